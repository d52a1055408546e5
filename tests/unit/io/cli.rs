//! Tests for argument parsing and batch sheet processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use tilemapper::EditorError;
    use tilemapper::editor::history::UndoMode;
    use tilemapper::io::cli::{Cli, SheetProcessor};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tilemapper").chain(args.iter().copied())).unwrap()
    }

    // Writes a sheet with `tiles` non-blank 32px cells in one row
    fn write_sheet(path: &Path, tiles: u32) {
        let mut sheet = RgbaImage::new(tiles * 32, 32);
        for col in 0..tiles {
            sheet.put_pixel(col * 32 + 3, 3, Rgba([120, 80, 40, 255]));
        }
        sheet.save(path).unwrap();
    }

    // Tests defaults follow the configuration constants
    // Verified by changing the default map size
    #[test]
    fn test_default_arguments() {
        let cli = parse(&["sheet.png"]);

        assert_eq!(cli.target, PathBuf::from("sheet.png"));
        assert_eq!(cli.map_size, 100);
        assert_eq!(cli.tile_size, 32);
        assert_eq!(cli.tolerance, 5);
        assert_eq!(cli.undo_mode, UndoMode::LastOccurrence);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
        assert_eq!(cli.verbose, 0);
    }

    // Tests flags and value enums parse
    // Verified by dropping the undo mode flag
    #[test]
    fn test_explicit_arguments() {
        let cli = parse(&[
            "sheets",
            "--map-size",
            "8",
            "--tile-size",
            "16",
            "--undo-mode",
            "exact-cell",
            "--tiles",
            "--preview",
            "-q",
            "-n",
            "-vv",
        ]);

        let config = cli.editor_config().unwrap();
        assert_eq!(config.map_size, 8);
        assert_eq!(config.extraction.tile_size, 16);
        assert_eq!(config.undo_mode, UndoMode::ExactCell);
        assert!(cli.tiles && cli.preview);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert_eq!(cli.verbose, 2);
    }

    // Tests a zero tile size is rejected before any processing
    // Verified by removing the tile size check
    #[test]
    fn test_zero_tile_size_rejected() {
        let cli = parse(&["sheet.png", "--tile-size", "0"]);
        assert!(matches!(
            cli.editor_config(),
            Err(EditorError::InvalidParameter {
                parameter: "tile_size",
                ..
            })
        ));
    }

    // Tests output and prefill locations sit next to the sheet
    // Verified by placing outputs in the working directory
    #[test]
    fn test_derived_paths() {
        let sheet = Path::new("assets/dungeon.png");
        assert_eq!(
            SheetProcessor::output_dir(sheet),
            PathBuf::from("assets/dungeon_map")
        );
        assert_eq!(
            SheetProcessor::prefill_path(sheet),
            PathBuf::from("assets/dungeon_pre.txt")
        );
    }

    // Tests a single sheet is sliced, scripted, exported and rendered
    // Verified by skipping the script
    #[test]
    fn test_process_single_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("hero.png");
        write_sheet(&sheet, 2);
        let script = dir.path().join("edit.txt");
        std::fs::write(&script, "select 1\npaint 0\nselect 0\npaint 1 1\n").unwrap();

        let cli = parse(&[
            sheet.to_str().unwrap(),
            "--script",
            script.to_str().unwrap(),
            "--map-size",
            "2",
            "--tiles",
            "--preview",
            "--quiet",
        ]);
        let written = SheetProcessor::new(cli).process().unwrap();

        let output = dir.path().join("hero_map");
        assert_eq!(written, vec![output.join("map.txt")]);
        assert_eq!(
            std::fs::read_to_string(output.join("map.txt")).unwrap(),
            "1   0"
        );
        assert!(output.join("tiles").join("tile_0.png").exists());
        assert!(output.join("tiles").join("tile_1.png").exists());
        assert!(output.join("preview.png").exists());
    }

    // Tests directories are processed in order and existing maps are skipped
    // Verified by ignoring the skip check
    #[test]
    fn test_process_directory_skips_existing() {
        let dir = tempfile::tempdir().unwrap();
        write_sheet(&dir.path().join("b.png"), 1);
        write_sheet(&dir.path().join("a.png"), 1);
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let args = [dir.path().to_str().unwrap(), "--map-size", "1", "-q"];
        let first = SheetProcessor::new(parse(&args)).process().unwrap();
        assert_eq!(
            first,
            vec![
                dir.path().join("a_map").join("map.txt"),
                dir.path().join("b_map").join("map.txt"),
            ]
        );

        let second = SheetProcessor::new(parse(&args)).process().unwrap();
        assert!(second.is_empty());
    }

    // Tests the prefill map seeds the grid before the script runs
    // Verified by loading the prefill after the script
    #[test]
    fn test_prefill_seeds_map() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = dir.path().join("town.png");
        write_sheet(&sheet, 1);
        std::fs::write(dir.path().join("town_pre.txt"), "0  0 ").unwrap();
        let script = dir.path().join("edit.txt");
        std::fs::write(&script, "select 0\npaint 3\n").unwrap();

        let cli = parse(&[
            sheet.to_str().unwrap(),
            "--prefill",
            "--script",
            script.to_str().unwrap(),
            "-q",
        ]);
        SheetProcessor::new(cli).process().unwrap();

        let map = std::fs::read_to_string(dir.path().join("town_map").join("map.txt")).unwrap();
        assert_eq!(map, "0  0 0");
    }

    // Tests non-PNG targets and bad scripts fail early
    // Verified by accepting any file extension
    #[test]
    fn test_invalid_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("sheet.txt");
        std::fs::write(&text, "not a sheet").unwrap();

        let result = SheetProcessor::new(parse(&[text.to_str().unwrap(), "-q"])).process();
        assert!(matches!(
            result,
            Err(EditorError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));

        let sheet = dir.path().join("ok.png");
        write_sheet(&sheet, 1);
        let script = dir.path().join("bad.txt");
        std::fs::write(&script, "select 0\nflood 2\n").unwrap();
        let result = SheetProcessor::new(parse(&[
            sheet.to_str().unwrap(),
            "--script",
            script.to_str().unwrap(),
            "-q",
        ]))
        .process();
        assert!(matches!(
            result,
            Err(EditorError::InvalidCommand { line: 2, .. })
        ));
    }
}
