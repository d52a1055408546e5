//! Input/output collaborators, configuration and error handling

/// Command-line interface and batch sheet processing
pub mod cli;
/// Editor constants and defaults
pub mod configuration;
/// Error types and path context
pub mod error;
/// Plain-text map export and import
pub mod export;
/// Sprite-sheet decoding and PNG rendering
pub mod image;
/// Terminal logger setup
pub mod logging;
/// Progress display for batch processing
pub mod progress;
/// Line-based edit scripts
pub mod script;
