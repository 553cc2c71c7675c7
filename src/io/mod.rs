//! Input/output and error handling

/// JSON tile catalog documents
pub mod catalog;
/// Command-line driver
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// Error types
pub mod error;
/// Result documents and layer dumps
pub mod export;
/// Terminal progress display
pub mod progress;
