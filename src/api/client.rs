//! Endpoint URL construction for the remote API.
//!
//! The backend exposes three GET endpoints under a common base:
//! `api/search`, `api/download` and `api/get-download`. Query values are
//! form-encoded with the `url` crate.

use crate::domain::file::sanitize_file_name;
use crate::domain::{DownloadAction, Provider, ResolvedFile, Result};
use url::Url;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://api-sfile-tools.vercel.app/";

/// Builds request URLs against a fixed API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base: Url,
}

impl ApiClient {
    /// Creates a client for `base`.
    ///
    /// A trailing slash is appended when missing so that endpoint paths are
    /// joined below the base instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ZsfileError::Request`] if `base` is not an absolute URL.
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let mut url = self.base.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    /// `api/search?query=&page=&source=`
    ///
    /// # Errors
    ///
    /// Fails only if the endpoint path cannot be joined onto the base.
    pub fn search_url(&self, query: &str, page: u32, source: Provider) -> Result<String> {
        let page = page.to_string();
        self.endpoint(
            "api/search",
            &[("query", query), ("page", &page), ("source", source.source_param())],
        )
    }

    /// `api/download?url=`
    ///
    /// # Errors
    ///
    /// Fails only if the endpoint path cannot be joined onto the base.
    pub fn resolve_url(&self, page_url: &str) -> Result<String> {
        self.endpoint("api/download", &[("url", page_url)])
    }

    /// `api/get-download?url=&cookies=`
    ///
    /// # Errors
    ///
    /// Fails only if the endpoint path cannot be joined onto the base.
    pub fn proxy_download_url(&self, direct_url: &str, cookies: &str) -> Result<String> {
        self.endpoint("api/get-download", &[("url", direct_url), ("cookies", cookies)])
    }

    /// Chooses the download action for a resolved file.
    ///
    /// The session cookie is only consulted for [`Provider::Simfile`]; an
    /// `sfile.co` resolution never produces a proxied link.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures for the proxy endpoint.
    pub fn download_action(
        &self,
        file: &ResolvedFile,
        session_cookie: Option<&str>,
    ) -> Result<DownloadAction> {
        let direct = file.info.download_url.clone();
        let cookie = session_cookie.filter(|c| !c.trim().is_empty());

        Ok(match (file.provider, cookie) {
            (Provider::Simfile, Some(cookie)) => DownloadAction::Proxy {
                url: self.proxy_download_url(&direct, cookie)?,
                file_name: sanitize_file_name(&file.info.name),
            },
            (Provider::Simfile, None) => DownloadAction::NewContext { url: direct },
            (Provider::Sfile, _) => DownloadAction::Navigate { url: direct },
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE_URL)
                .expect("Built-in default base URL should always parse"),
        }
    }
}
