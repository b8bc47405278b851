//! Error types for the zsfile plugin.
//!
//! [`ZsfileError`] is the crate-wide error with a [`Result`] alias, following
//! the `thiserror` conventions used throughout the plugin. [`ValidationError`]
//! is separate because its `Display` text is shown to the user verbatim.

use thiserror::Error;

/// The main error type for zsfile plugin operations.
///
/// # Examples
///
/// ```
/// use zsfile::domain::ZsfileError;
///
/// fn load_theme() -> Result<(), ZsfileError> {
///     Err(ZsfileError::Theme("unknown color key".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum ZsfileError {
    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A request URL could not be built from the configured base.
    #[error("Request error: {0}")]
    Request(String),
}

impl From<url::ParseError> for ZsfileError {
    fn from(err: url::ParseError) -> Self {
        Self::Request(err.to_string())
    }
}

/// Input rejected before any request is issued.
///
/// The messages are the exact texts displayed on the error surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The search input was empty or whitespace only.
    #[error("Please enter a search query!")]
    EmptyQuery,

    /// The download input was empty or whitespace only.
    #[error("Please enter a Sfile or Simfile URL!")]
    EmptyUrl,

    /// The download input is not a supported provider page URL.
    #[error("Invalid URL! Please enter a valid Sfile.co or Simfile.co URL.")]
    UnsupportedUrl,
}

/// A specialized `Result` type for zsfile operations.
pub type Result<T> = std::result::Result<T, ZsfileError>;
