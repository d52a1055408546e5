//! Tests for editor handlers wiring palette, map and undo together

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tilemapper::EditorError;
    use tilemapper::editor::history::UndoMode;
    use tilemapper::editor::state::{EditorConfig, EditorState};
    use tilemapper::io::image::SourceImage;
    use tilemapper::spatial::tiles::ExtractionConfig;

    // Sheet of `cols` 32px cells in one row, each with a distinct coloured pixel
    fn strip(cols: u32) -> RgbaImage {
        let mut image = RgbaImage::new(cols * 32, 32);
        for col in 0..cols {
            image.put_pixel(col * 32 + 1, 1, Rgba([40 + col as u8, 200, 10, 255]));
        }
        image
    }

    fn png_bytes(image: RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn small_editor(map_size: usize) -> EditorState {
        EditorState::new(EditorConfig {
            map_size,
            ..EditorConfig::default()
        })
        .unwrap()
    }

    // Tests the default editor starts with an empty palette and the startup map
    // Verified by loading a placeholder tile on creation
    #[test]
    fn test_default_state() {
        let state = EditorState::default();
        assert!(state.palette().is_empty());
        assert_eq!(state.grid().size(), 100);
        assert_eq!(state.history().mode(), UndoMode::LastOccurrence);
        assert_eq!(state.extraction(), ExtractionConfig::default());
    }

    // Tests an invalid configured size is rejected
    // Verified by clamping size to one
    #[test]
    fn test_new_rejects_zero_size() {
        let result = EditorState::new(EditorConfig {
            map_size: 0,
            ..EditorConfig::default()
        });
        assert!(matches!(result, Err(EditorError::InvalidSize { .. })));
    }

    // Tests decoded bytes populate the palette
    // Verified by skipping palette load after decode
    #[test]
    fn test_load_bytes() {
        let mut state = small_editor(4);
        let count = state.load_bytes(&png_bytes(strip(3))).unwrap();

        assert_eq!(count, 3);
        assert_eq!(state.palette().len(), 3);
    }

    // Tests undecodable bytes fail without touching the palette
    // Verified by clearing the palette before decoding
    #[test]
    fn test_load_bytes_decode_error_keeps_palette() {
        let mut state = small_editor(4);
        state.load_bytes(&png_bytes(strip(2))).unwrap();
        state.select_tile(1).unwrap();

        let result = state.load_bytes(b"definitely not a png");

        assert!(matches!(result, Err(EditorError::Decode { .. })));
        assert_eq!(state.palette().len(), 2);
        assert_eq!(state.palette().selected(), Some(1));
    }

    // Tests painting without a selection changes nothing
    // Verified by painting tile 0 when nothing is selected
    #[test]
    fn test_paint_without_selection_is_noop() {
        let mut state = small_editor(4);
        state.load_bytes(&png_bytes(strip(2))).unwrap();

        assert_eq!(state.paint_cell(3).unwrap(), None);
        assert_eq!(state.grid().filled_count(), 0);
        assert_eq!(state.history().last(), None);
    }

    // Tests painting places the selected tile and enables undo
    // Verified by skipping the history record
    #[test]
    fn test_paint_and_undo() {
        let mut state = small_editor(4);
        state.load_bytes(&png_bytes(strip(2))).unwrap();
        state.select_tile(1).unwrap();

        assert_eq!(state.paint_cell(6).unwrap(), Some(1));
        assert_eq!(state.paint_at(3, 2).unwrap(), Some(1));
        assert_eq!(state.grid().cell(14).unwrap(), Some(1));

        assert_eq!(state.undo(), Some(14));
        assert_eq!(state.grid().cell(6).unwrap(), Some(1));
        assert_eq!(state.undo(), None);
    }

    // Tests failed handlers leave state unchanged
    // Verified by recording history before placing
    #[test]
    fn test_failures_leave_state_intact() {
        let mut state = small_editor(2);
        state.load_bytes(&png_bytes(strip(1))).unwrap();
        state.select_tile(0).unwrap();
        state.paint_cell(0).unwrap();

        assert!(matches!(
            state.paint_cell(4),
            Err(EditorError::OutOfBounds { .. })
        ));
        assert!(state.paint_at(0, 2).is_err());
        assert!(matches!(
            state.select_tile(5),
            Err(EditorError::InvalidTile { .. })
        ));
        assert!(matches!(
            state.resize(0),
            Err(EditorError::InvalidSize { .. })
        ));
        assert!(state.erase_cell(9).is_err());

        assert_eq!(state.grid().size(), 2);
        assert_eq!(state.grid().cells(), &[Some(0), None, None, None]);
        assert_eq!(state.palette().selected(), Some(0));
        assert_eq!(state.history().last().map(|p| p.index), Some(0));
    }

    // Tests erase, resize, clear and export through the editor
    // Verified by exporting before applying resize
    #[test]
    fn test_edit_and_export() {
        let mut state = small_editor(3);
        state.load_bytes(&png_bytes(strip(3))).unwrap();

        for (index, tile) in [(0, 2), (1, 0), (4, 1)] {
            state.select_tile(tile).unwrap();
            state.paint_cell(index).unwrap();
        }
        state.erase_cell(1).unwrap();
        assert_eq!(state.export(), b"2    1    ".to_vec());

        state.resize(2).unwrap();
        assert_eq!(state.export(), b"2   ".to_vec());

        state.clear_all();
        assert_eq!(state.export(), b"   ".to_vec());
    }

    // Tests a new sheet replaces the palette but the map keeps its references
    // Verified by clearing the map on load
    #[test]
    fn test_reload_keeps_map_references() {
        let mut state = small_editor(2);
        state.load_bytes(&png_bytes(strip(3))).unwrap();
        state.select_tile(2).unwrap();
        state.paint_cell(3).unwrap();

        let image = SourceImage::from_rgba(strip(1)).unwrap();
        assert_eq!(state.load_image(&image), 1);

        assert_eq!(state.palette().selected(), None);
        assert_eq!(state.grid().cell(3).unwrap(), Some(2));
    }

    // Tests importing replaces the map only when the text parses
    // Verified by assigning the grid before parsing
    #[test]
    fn test_import_map() {
        let mut state = small_editor(5);

        state.import_map("1  2 ").unwrap();
        assert_eq!(state.grid().size(), 2);

        assert!(state.import_map("1 2 3").is_err());
        assert_eq!(state.grid().cells(), &[Some(1), None, Some(2), None]);
    }

    // Tests the progress callback is forwarded during loading
    // Verified by dropping the callback
    #[test]
    fn test_load_image_with_progress() {
        let mut state = small_editor(2);
        let image = SourceImage::from_rgba(strip(2)).unwrap();
        let mut calls = 0;

        state.load_image_with(&image, |_| calls += 1);

        assert_eq!(calls, 2);
    }
}
