//! The two supported file-hosting providers.
//!
//! Every provider-specific decision (page URL validation, entry URL
//! normalization, the `source` query parameter, the download action) is
//! dispatched on [`Provider`] instead of matching URL substrings.

use super::error::ValidationError;
use serde::{Deserialize, Serialize};

/// A supported file-hosting domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// `sfile.co`
    Sfile,
    /// `simfile.co`, the provider whose resolutions may carry a session cookie.
    Simfile,
}

impl Provider {
    pub const ALL: [Self; 2] = [Self::Sfile, Self::Simfile];

    /// Bare host name of the provider.
    #[must_use]
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Sfile => "sfile.co",
            Self::Simfile => "simfile.co",
        }
    }

    /// Value of the `source` query parameter for the search endpoint.
    #[must_use]
    pub const fn source_param(self) -> &'static str {
        match self {
            Self::Sfile => "sfile",
            Self::Simfile => "simfile",
        }
    }

    /// Human-readable name used in loader and selector labels.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Sfile => "Sfile.co",
            Self::Simfile => "Simfile.co",
        }
    }

    /// The other provider.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Sfile => Self::Simfile,
            Self::Simfile => Self::Sfile,
        }
    }

    /// Whether resolutions for this provider can return a session cookie
    /// that authorizes a proxied download.
    #[must_use]
    pub const fn issues_session_cookie(self) -> bool {
        matches!(self, Self::Simfile)
    }

    /// Parses a `source` identifier (`sfile` / `simfile`, case-insensitive).
    #[must_use]
    pub fn from_source(source: &str) -> Option<Self> {
        let source = source.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.source_param().eq_ignore_ascii_case(source))
    }

    /// Validates a provider page URL and returns its provider.
    ///
    /// Accepts exactly `https://<domain>/<id>` with an optional trailing
    /// slash, where `<id>` is one or more ASCII alphanumerics. Matching is
    /// case-sensitive on scheme and host.
    ///
    /// # Examples
    ///
    /// ```
    /// use zsfile::domain::Provider;
    ///
    /// assert_eq!(Provider::from_page_url("https://sfile.co/abc123/"), Ok(Provider::Sfile));
    /// assert!(Provider::from_page_url("https://sfile.co/abc/def").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyUrl`] for blank input and
    /// [`ValidationError::UnsupportedUrl`] for anything that does not match.
    pub fn from_page_url(url: &str) -> Result<Self, ValidationError> {
        if url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        Self::ALL
            .into_iter()
            .find(|provider| provider.matches_page_url(url))
            .ok_or(ValidationError::UnsupportedUrl)
    }

    fn matches_page_url(self, url: &str) -> bool {
        let Some(rest) = url
            .strip_prefix("https://")
            .and_then(|u| u.strip_prefix(self.domain()))
            .and_then(|u| u.strip_prefix('/'))
        else {
            return false;
        };

        let id = rest.strip_suffix('/').unwrap_or(rest);
        !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Normalizes an entry URL returned by the search endpoint.
    ///
    /// `sfile.co` entries may come back as `http://` links or bare paths;
    /// both are rewritten to `https://sfile.co/...`. Other providers' URLs
    /// are returned as-is.
    #[must_use]
    pub fn normalize_entry_url(self, url: &str) -> String {
        match self {
            Self::Sfile => {
                let path = url
                    .strip_prefix("https://sfile.co")
                    .or_else(|| url.strip_prefix("http://sfile.co"))
                    .unwrap_or(url);
                if path.starts_with('/') {
                    format!("https://sfile.co{path}")
                } else if path.starts_with("http://") || path.starts_with("https://") {
                    path.to_string()
                } else {
                    format!("https://sfile.co/{path}")
                }
            }
            Self::Simfile => url.to_string(),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
