//! Tests for edit script parsing and application

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tilemapper::EditorError;
    use tilemapper::editor::state::{EditorConfig, EditorState};
    use tilemapper::io::image::SourceImage;
    use tilemapper::io::script::{Command, parse_script, run_script};

    fn editor_with_tiles(tiles: u32, map_size: usize) -> EditorState {
        let mut sheet = RgbaImage::new(tiles * 32, 32);
        for col in 0..tiles {
            sheet.put_pixel(col * 32, 0, Rgba([255, 255, 255, 255]));
        }
        let mut state = EditorState::new(EditorConfig {
            map_size,
            ..EditorConfig::default()
        })
        .unwrap();
        state.load_image(&SourceImage::from_rgba(sheet).unwrap());
        state
    }

    // Tests every command form parses
    // Verified by mapping two-argument paint to an index
    #[test]
    fn test_parse_each_command() {
        let cases = [
            ("select 3", Command::Select(3)),
            ("paint 10", Command::Paint(10)),
            ("paint 2 4", Command::PaintAt(2, 4)),
            ("erase 7", Command::Erase(7)),
            ("resize 16", Command::Resize(16)),
            ("clear", Command::Clear),
            ("  undo  ", Command::Undo),
        ];

        for (line, expected) in cases {
            assert_eq!(line.parse::<Command>(), Ok(expected), "parsing '{line}'");
        }
    }

    // Tests malformed commands are rejected
    // Verified by ignoring surplus arguments
    #[test]
    fn test_parse_rejects_bad_commands() {
        assert!("fill 3".parse::<Command>().is_err());
        assert!("select".parse::<Command>().is_err());
        assert!("clear 1".parse::<Command>().is_err());
        assert!("paint 1 2 3".parse::<Command>().is_err());
        assert!("resize -1".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    // Tests comments and blank lines are skipped
    // Verified by treating '#' lines as commands
    #[test]
    fn test_parse_script_skips_comments() {
        let script = "# header\n\nselect 1  # pick grass\npaint 0\n   \nundo\n";

        let commands = parse_script(script).unwrap();

        assert_eq!(
            commands,
            vec![Command::Select(1), Command::Paint(0), Command::Undo]
        );
    }

    // Tests parse failures report the one-based script line
    // Verified by counting only non-blank lines
    #[test]
    fn test_parse_script_reports_line() {
        let script = "select 0\n\n# comment\nstamp 4\n";

        match parse_script(script) {
            Err(EditorError::InvalidCommand { line, reason }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("stamp"));
            }
            other => unreachable!("Expected InvalidCommand error, got {other:?}"),
        }
    }

    // Tests a script drives the editor through paints, resize and undo
    // Verified by applying commands in reverse
    #[test]
    fn test_run_script() {
        let mut state = editor_with_tiles(3, 3);
        let commands =
            parse_script("select 2\npaint 0\npaint 1 1\nselect 0\npaint 8\nerase 0\nundo\n")
                .unwrap();

        let applied = run_script(&mut state, &commands).unwrap();

        assert_eq!(applied, 7);
        assert_eq!(state.export(), b"    2    ".to_vec());
    }

    // Tests resize and clear commands
    // Verified by making clear a no-op
    #[test]
    fn test_resize_and_clear_commands() {
        let mut state = editor_with_tiles(1, 4);
        Command::Select(0).apply(&mut state).unwrap();
        Command::Paint(15).apply(&mut state).unwrap();
        Command::Resize(2).apply(&mut state).unwrap();
        assert_eq!(state.grid().filled_count(), 0);

        Command::Paint(3).apply(&mut state).unwrap();
        Command::Clear.apply(&mut state).unwrap();
        assert_eq!(state.grid().filled_count(), 0);
        assert_eq!(state.grid().size(), 2);

        // Undo with nothing left to clear succeeds quietly
        Command::Undo.apply(&mut state).unwrap();
    }

    // Tests the first failing command stops the run
    // Verified by continuing past errors
    #[test]
    fn test_run_script_stops_at_error() {
        let mut state = editor_with_tiles(1, 2);
        let commands = [
            Command::Select(0),
            Command::Paint(0),
            Command::Select(4),
            Command::Paint(1),
        ];

        let result = run_script(&mut state, &commands);

        assert!(matches!(result, Err(EditorError::InvalidTile { id: 4, .. })));
        assert_eq!(state.grid().cells(), &[Some(0), None, None, None]);
    }
}
