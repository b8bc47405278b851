//! Domain layer for the zsfile plugin.
//!
//! Core types independent of Zellij APIs and of the backend's wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`provider`]: The two supported file-hosting providers
//! - [`file`]: Search entries, result pages, resolved downloads
//!
//! # Examples
//!
//! ```
//! use zsfile::domain::{Provider, ValidationError};
//!
//! assert_eq!(
//!     Provider::from_page_url("https://example.com/abc"),
//!     Err(ValidationError::UnsupportedUrl)
//! );
//! ```

pub mod error;
pub mod file;
pub mod provider;

pub use error::{Result, ValidationError, ZsfileError};
pub use file::{DownloadAction, DownloadInfo, EntryIcon, FileEntry, ResolvedFile, SearchResults};
pub use provider::Provider;
