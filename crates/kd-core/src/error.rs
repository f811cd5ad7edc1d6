//! Error types for KD.

use thiserror::Error;

/// Failure to turn a textual color specification into a `Color`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is neither `#RRGGBB`, `#AARRGGBB`, nor a known color name.
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),
}
