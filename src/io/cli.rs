//! Command-line interface for slicing sprite sheets and painting tile maps

use crate::editor::history::UndoMode;
use crate::editor::state::{EditorConfig, EditorState};
use crate::io::configuration::{
    DEFAULT_MAP_SIZE, EMPTY_TOLERANCE, EXPORT_FILE_NAME, OUTPUT_DIR_SUFFIX, PREFILL_SUFFIX,
    PREVIEW_FILE_NAME, TILE_SIZE, TILES_DIR_NAME,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::export::{read_map, write_map};
use crate::io::image::{SourceImage, export_tiles, render_grid, save_png};
use crate::io::progress::ProgressManager;
use crate::io::script::{Command, parse_script, run_script};
use crate::spatial::tiles::{ExtractionConfig, grid_dimensions};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilemapper")]
#[command(
    author,
    version,
    about = "Slice sprite sheets into tiles and paint them onto a square map"
)]
/// Command-line arguments for the tile map tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG sprite sheet or directory of sheets
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Edit script applied to every sheet (one command per line)
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Side length of the map
    #[arg(short = 'm', long, default_value_t = DEFAULT_MAP_SIZE)]
    pub map_size: usize,

    /// Tile side length in pixels
    #[arg(short, long, default_value_t = TILE_SIZE)]
    pub tile_size: usize,

    /// Highest RGB value treated as blank when filtering tiles
    #[arg(long, default_value_t = EMPTY_TOLERANCE)]
    pub tolerance: u8,

    /// How undo locates the cell to clear
    #[arg(short, long, value_enum, default_value_t = UndoMode::LastOccurrence)]
    pub undo_mode: UndoMode,

    /// Write every extracted tile as a PNG
    #[arg(long)]
    pub tiles: bool,

    /// Render the painted map as a PNG preview
    #[arg(long)]
    pub preview: bool,

    /// Seed the map from <sheet>_pre.txt if available
    #[arg(short, long)]
    pub prefill: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process sheets even if their map already exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Editor settings derived from the flags
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the tile size is zero
    pub fn editor_config(&self) -> Result<EditorConfig> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be at least one pixel",
            ));
        }
        Ok(EditorConfig {
            map_size: self.map_size,
            extraction: ExtractionConfig {
                tile_size: self.tile_size,
                empty_tolerance: self.tolerance,
            },
            undo_mode: self.undo_mode,
        })
    }
}

/// Orchestrates batch processing of sprite sheets with progress tracking
pub struct SheetProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl SheetProcessor {
    /// Create a new sheet processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process sheets according to CLI arguments
    ///
    /// Returns the paths of the maps written.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, script parsing or sheet
    /// processing fails
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let config = self.cli.editor_config()?;
        let commands = self.load_script()?;
        let sheets = self.collect_sheets()?;

        if sheets.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sheets.len());
        }

        let mut written = Vec::with_capacity(sheets.len());
        for (index, sheet) in sheets.iter().enumerate() {
            written.push(self.process_sheet(sheet, index, config, &commands)?);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn load_script(&self) -> Result<Vec<Command>> {
        let Some(path) = &self.cli.script else {
            return Ok(Vec::new());
        };
        let text =
            std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read script", e))?;
        parse_script(&text)
    }

    fn collect_sheets(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_png(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file must be a PNG image",
                ));
            }
            Ok(if self.should_process_sheet(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut sheets = Vec::new();
            let entries = std::fs::read_dir(target)
                .map_err(|e| file_system_error(target, "read directory", e))?;
            for entry in entries {
                let path = entry?.path();
                if path.is_file() && is_png(&path) && self.should_process_sheet(&path) {
                    sheets.push(path);
                }
            }
            sheets.sort();
            Ok(sheets)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a PNG file or directory",
            ))
        }
    }

    fn should_process_sheet(&self, sheet: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let map_path = Self::output_dir(sheet).join(EXPORT_FILE_NAME);
        if map_path.exists() {
            log::info!("skipping {} (map exists)", sheet.display());
            false
        } else {
            true
        }
    }

    fn process_sheet(
        &mut self,
        sheet: &Path,
        index: usize,
        config: EditorConfig,
        commands: &[Command],
    ) -> Result<PathBuf> {
        let output_dir = Self::output_dir(sheet);
        let image = SourceImage::open(sheet)?;
        let mut state = EditorState::new(config)?;

        let (rows, cols) = grid_dimensions(
            image.width(),
            image.height(),
            config.extraction.tile_size,
        );
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_sheet(index, sheet, rows * cols);
        }

        let progress = self.progress_manager.as_mut();
        let tile_count = match progress {
            Some(pm) => state.load_image_with(&image, |scanned| pm.update_cells(index, scanned)),
            None => state.load_image(&image),
        };
        if tile_count == 0 {
            log::warn!("{} contains no non-blank tiles", sheet.display());
        }

        if self.cli.prefill {
            let prefill_path = Self::prefill_path(sheet);
            if prefill_path.exists() {
                state.set_grid(read_map(&prefill_path)?);
                log::info!("seeded map from {}", prefill_path.display());
            } else {
                log::warn!(
                    "no prefill found at {} (continuing with an empty map)",
                    prefill_path.display()
                );
            }
        }

        let applied = run_script(&mut state, commands)?;
        log::debug!("applied {applied} commands to {}", sheet.display());

        let map_path = output_dir.join(EXPORT_FILE_NAME);
        write_map(state.grid(), &map_path)?;

        if self.cli.tiles {
            export_tiles(state.palette(), &output_dir.join(TILES_DIR_NAME))?;
        }

        if self.cli.preview {
            let preview = render_grid(state.grid(), state.palette(), config.extraction.tile_size)?;
            save_png(&preview, &output_dir.join(PREVIEW_FILE_NAME))?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_sheet(index);
        }

        Ok(map_path)
    }

    /// Directory receiving all outputs for `sheet`
    pub fn output_dir(sheet: &Path) -> PathBuf {
        let stem = sheet.file_stem().unwrap_or_default();
        let dir_name = format!("{}{}", stem.to_string_lossy(), OUTPUT_DIR_SUFFIX);

        if let Some(parent) = sheet.parent() {
            parent.join(dir_name)
        } else {
            PathBuf::from(dir_name)
        }
    }

    /// Map text used to seed the grid for `sheet`
    pub fn prefill_path(sheet: &Path) -> PathBuf {
        let stem = sheet.file_stem().unwrap_or_default();
        let prefill_name = format!("{}{}", stem.to_string_lossy(), PREFILL_SUFFIX);

        if let Some(parent) = sheet.parent() {
            parent.join(prefill_name)
        } else {
            PathBuf::from(prefill_name)
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}
