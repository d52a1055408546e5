//! Editor constants and runtime configuration defaults

// Extraction defaults
/// Side length of a square tile in pixels
pub const TILE_SIZE: usize = 32;
/// Highest RGB channel value still treated as blank
pub const EMPTY_TOLERANCE: u8 = 5;

// Grid defaults
/// Side length of the map created at startup
pub const DEFAULT_MAP_SIZE: usize = 100;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed map side length
pub const MAX_MAP_SIZE: usize = 4096;

// Export format
/// Separator placed between cell tokens in exported maps
pub const EXPORT_SEPARATOR: char = ' ';
/// Suggested file name for exported maps
pub const EXPORT_FILE_NAME: &str = "map.txt";

// Output layout
/// Suffix of the per-sheet output directory
pub const OUTPUT_DIR_SUFFIX: &str = "_map";
/// Directory holding rendered palette tiles inside the output directory
pub const TILES_DIR_NAME: &str = "tiles";
/// File name of the rendered map preview
pub const PREVIEW_FILE_NAME: &str = "preview.png";
/// Largest preview side length in pixels (an RGBA canvas of 256 MiB)
pub const MAX_PREVIEW_SIDE: usize = 8192;
/// Suffix of the map text used to seed the grid before editing
pub const PREFILL_SUFFIX: &str = "_pre.txt";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
