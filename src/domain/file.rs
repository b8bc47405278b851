//! File records produced by the search and resolution endpoints.
//!
//! These are the domain shapes the controller stores and renders. Wire
//! payloads are decoded in [`crate::api`] and converted into these types, so
//! nothing here knows about the backend's JSON layout.

use super::provider::Provider;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Icon attached to a search entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryIcon {
    /// An image URL.
    Image(String),
    /// An inline markup snippet (the backend sends `<div ...>` fragments).
    Markup(String),
}

impl EntryIcon {
    /// Classifies a raw icon value from the backend.
    #[must_use]
    pub fn from_raw(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.starts_with("<div") {
            Some(Self::Markup(raw.to_string()))
        } else {
            Some(Self::Image(raw.to_string()))
        }
    }

    /// Short file-type tag for the results table.
    ///
    /// Markup icons carry the type as their first CSS class; image icons as
    /// the extension of the image's file name.
    ///
    /// ```
    /// use zsfile::domain::EntryIcon;
    ///
    /// let icon = EntryIcon::Markup(r#"<div class="apk icon"></div>"#.into());
    /// assert_eq!(icon.label().as_deref(), Some("apk"));
    /// ```
    #[must_use]
    pub fn label(&self) -> Option<String> {
        const LABEL_MAX: usize = 5;

        let tag = match self {
            Self::Markup(markup) => {
                let (_, rest) = markup.split_once("class=\"")?;
                rest.split('"').next()?.split_whitespace().next()?
            }
            Self::Image(url) => {
                let path = url.split(|c| c == '?' || c == '#').next()?;
                let file = path.rsplit('/').next()?;
                file.rsplit_once('.')?.1
            }
        };

        let valid = !tag.is_empty()
            && tag.len() <= LABEL_MAX
            && tag.bytes().all(|b| b.is_ascii_alphanumeric());
        valid.then(|| tag.to_ascii_lowercase())
    }
}

/// One file record returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    /// Provider page URL, already normalized.
    pub url: String,
    pub size: String,
    pub date: Option<String>,
    pub downloads: Option<String>,
    pub icon: Option<EntryIcon>,
}

/// A page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub entries: Vec<FileEntry>,
    pub query: String,
    pub source: Provider,
    pub total_results: u64,
    pub current_page: u32,
    pub page_count: u32,
}

impl SearchResults {
    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }
}

/// Metadata and direct link returned by the resolution endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadInfo {
    pub name: String,
    pub size: Option<String>,
    pub mime_type: Option<String>,
    pub uploaded: Option<String>,
    pub downloads: Option<String>,
    pub download_url: String,
    /// Session cookie value, only returned by some providers.
    pub cookies: Option<String>,
}

/// A resolution bound to the page URL it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub info: DownloadInfo,
    pub source_url: String,
    pub provider: Provider,
    /// Unix timestamp of the resolution; direct links expire.
    pub resolved_at: i64,
}

impl ResolvedFile {
    /// Returns a human-readable age of the resolution relative to `now`.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn age(&self, now: i64) -> String {
        let diff = now - self.resolved_at;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// What "download" means for a resolved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadAction {
    /// Fetch through the backend proxy, which replays the session cookie.
    Proxy {
        /// Fully built proxy endpoint URL.
        url: String,
        /// Sanitized name to save the file under.
        file_name: String,
    },
    /// Hand the direct URL to the system opener.
    Navigate { url: String },
    /// Download the direct URL in a new floating pane.
    NewContext { url: String },
}

impl DownloadAction {
    /// Button label shown in the detail view.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Proxy { .. } => "Download File (via proxy)",
            Self::Navigate { .. } => "Download File",
            Self::NewContext { .. } => "Download File (new pane)",
        }
    }
}

/// Formats a count with `,` thousands separators.
///
/// ```
/// use zsfile::domain::file::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Sanitizes a backend-supplied file name for use as a local file name.
///
/// - Replaces NUL, `/`, `\`, and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces, dots and underscores
/// - Limits length to 255 bytes
/// - Falls back to `download` when nothing is left
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else {
            c
        };

        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');

    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }

    if take == 0 {
        "download".to_string()
    } else {
        trimmed[..take].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(at: i64) -> ResolvedFile {
        ResolvedFile {
            info: DownloadInfo {
                name: "a.zip".into(),
                size: None,
                mime_type: None,
                uploaded: None,
                downloads: None,
                download_url: "https://cdn.example/a.zip".into(),
                cookies: None,
            },
            source_url: "https://sfile.co/abc".into(),
            provider: Provider::Sfile,
            resolved_at: at,
        }
    }

    #[test]
    fn age_buckets() {
        let file = resolved(1_000_000);
        assert_eq!(file.age(1_000_030), "just now");
        assert_eq!(file.age(1_000_300), "5m ago");
        assert_eq!(file.age(1_000_000 + 3 * 3600), "3h ago");
        assert_eq!(file.age(1_000_000 + 2 * 86400), "2d ago");
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
    }

    #[test]
    fn icons_are_classified() {
        assert_eq!(
            EntryIcon::from_raw("<div class=\"zip\"></div>"),
            Some(EntryIcon::Markup("<div class=\"zip\"></div>".into()))
        );
        assert_eq!(
            EntryIcon::from_raw("https://img.example/i.png"),
            Some(EntryIcon::Image("https://img.example/i.png".into()))
        );
        assert_eq!(EntryIcon::from_raw("  "), None);
    }

    #[test]
    fn icon_labels_come_from_class_or_extension() {
        let markup = EntryIcon::Markup("<div class=\"ZIP file-icon\"></div>".into());
        assert_eq!(markup.label().as_deref(), Some("zip"));

        let image = EntryIcon::Image("https://img.example/icons/pdf.PNG?v=2".into());
        assert_eq!(image.label().as_deref(), Some("png"));

        assert_eq!(EntryIcon::Markup("<div></div>".into()).label(), None);
        assert_eq!(EntryIcon::Image("https://img.example/icon".into()).label(), None);
        assert_eq!(
            EntryIcon::Markup("<div class=\"application-archive\"></div>".into()).label(),
            None
        );
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_file_name("a/b\\c.txt"), "a_b_c.txt");
        assert_eq!(sanitize_file_name("  my file.apk  "), "my file.apk");
        assert_eq!(sanitize_file_name("..."), "download");
    }
}
