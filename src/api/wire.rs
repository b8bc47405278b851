//! Backend JSON payloads and response decoding.
//!
//! The backend is loose about types (counts arrive as numbers or strings,
//! optional fields as `null`, `""` or missing), so fields go through the
//! lenient deserializers below before being converted into domain types.

use crate::domain::{DownloadInfo, EntryIcon, FileEntry, Provider, ResolvedFile, SearchResults};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Which endpoint a response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Resolve,
}

impl Endpoint {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Resolve => "resolve",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "search" => Some(Self::Search),
            "resolve" => Some(Self::Resolve),
            _ => None,
        }
    }
}

/// A response that could not be turned into a result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-2xx status from the host or the backend.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Backend answered `success: false` with a message.
    #[error("rejected by backend: {0}")]
    Rejected(String),
}

impl FetchError {
    /// Text shown on the error surface.
    #[must_use]
    pub fn user_message(&self, endpoint: Endpoint) -> String {
        match (self, endpoint) {
            (Self::Status(_), Endpoint::Search) => "Failed to search. Please try again.".to_string(),
            (Self::Status(_), Endpoint::Resolve) => {
                "Failed to get download link. Please try again.".to_string()
            }
            (Self::Malformed(_), _) => "Failed to parse response data!".to_string(),
            (Self::Rejected(message), _) => message.clone(),
        }
    }
}

/// Successful search outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResults),
    Empty,
}

mod lenient {
    use super::{Deserialize, Deserializer, Value};

    /// Strings and scalars as trimmed text; null/empty as `None`.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::String(s)) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        })
    }

    /// Numbers or numeric strings (`"1,234"` allowed); anything else as 0.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        Ok(match Option::<Value>::deserialize(d)? {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().replace(',', "").parse().unwrap_or(0),
            _ => 0,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(matches!(Option::<Value>::deserialize(d)?, Some(Value::Bool(true))))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    #[serde(default, deserialize_with = "lenient::flag")]
    success: bool,
    #[serde(default)]
    data: Option<Vec<EntryPayload>>,
    #[serde(default, deserialize_with = "lenient::count")]
    total_results: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    current_page: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    page_count: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    size: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    downloads: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    icon: Option<String>,
}

impl EntryPayload {
    fn into_entry(self, source: Provider) -> Option<FileEntry> {
        let Some(url) = self.url else {
            tracing::debug!(name = ?self.name, "dropping search entry without url");
            return None;
        };
        let url = source.normalize_entry_url(&url);
        Some(FileEntry {
            name: self.name.unwrap_or_else(|| url.clone()),
            url,
            size: self.size.unwrap_or_default(),
            date: self.date,
            downloads: self.downloads,
            icon: self.icon.as_deref().and_then(EntryIcon::from_raw),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ResolvePayload {
    #[serde(default, deserialize_with = "lenient::flag")]
    success: bool,
    #[serde(default)]
    data: Option<DownloadPayload>,
    #[serde(default, deserialize_with = "lenient::text")]
    cookies: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadPayload {
    #[serde(default, deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    size: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    uploaded: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    downloads: Option<String>,
    download_url: String,
}

const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

fn clamp_page(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX).max(1)
}

/// Decodes a search response.
///
/// `query` and `source` are the parameters the request was issued with.
///
/// # Errors
///
/// [`FetchError::Status`] for non-2xx statuses, [`FetchError::Malformed`]
/// for unparseable bodies, [`FetchError::Rejected`] when the backend reports
/// `success: false` with a message.
pub fn decode_search(
    status: u16,
    body: &[u8],
    query: &str,
    source: Provider,
) -> Result<SearchOutcome, FetchError> {
    if !is_success(status) {
        return Err(FetchError::Status(status));
    }

    let payload: SearchPayload = serde_json::from_slice(body)?;

    if !payload.success {
        if let Some(message) = payload.message {
            return Err(FetchError::Rejected(message));
        }
        return Ok(SearchOutcome::Empty);
    }

    let entries: Vec<FileEntry> = payload
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|e| e.into_entry(source))
        .collect();

    if entries.is_empty() {
        return Ok(SearchOutcome::Empty);
    }

    let page_count = clamp_page(payload.page_count);
    let current_page = clamp_page(payload.current_page).min(page_count);

    Ok(SearchOutcome::Found(SearchResults {
        entries,
        query: query.to_string(),
        source,
        total_results: payload.total_results,
        current_page,
        page_count,
    }))
}

/// Decodes a resolution response for `source_url`.
///
/// `resolved_at` is stamped onto the result as its Unix time.
///
/// # Errors
///
/// Same classification as [`decode_search`]; a `success: false` response
/// without a message is reported as [`FetchError::Status`] with the
/// original status so the generic retry text is shown.
pub fn decode_resolve(
    status: u16,
    body: &[u8],
    source_url: &str,
    provider: Provider,
    resolved_at: i64,
) -> Result<ResolvedFile, FetchError> {
    if !is_success(status) {
        return Err(FetchError::Status(status));
    }

    let payload: ResolvePayload = serde_json::from_slice(body)?;

    let (true, Some(data)) = (payload.success, payload.data) else {
        return Err(payload
            .message
            .map_or(FetchError::Status(status), FetchError::Rejected));
    };

    Ok(ResolvedFile {
        info: DownloadInfo {
            name: data.name.unwrap_or_else(|| "Unknown file".to_string()),
            size: data.size,
            mime_type: data.mime_type,
            uploaded: data.uploaded,
            downloads: data.downloads,
            download_url: data.download_url,
            cookies: payload.cookies,
        },
        source_url: source_url.to_string(),
        provider,
        resolved_at,
    })
}
