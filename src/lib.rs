//! zsfile: a Zellij plugin for searching Sfile.co / Simfile.co and resolving
//! direct download links.
//!
//! All scraping and link resolution happens behind a remote HTTP API; the
//! plugin validates input, issues requests through the host, renders the
//! results and hands downloads to the clipboard, the system opener or a
//! floating `curl` pane.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Key mapping, host calls
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, request tagging                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Domain Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (domain/)     │
//! │ - Rendering   │   │ - URL builder │   │ - Providers   │
//! │ - Theming     │   │ - JSON decode │   │ - File records│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zsfile.wasm" {
//!         api_base_url "https://api-sfile-tools.vercel.app/"
//!         default_source "simfile"
//!         copy_command "wl-copy"
//!         download_dir "/home/me/Downloads"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Library Usage
//!
//! ```rust
//! use zsfile::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! handle_event(&mut state, &Event::SwitchTab)?;
//! for c in "https://sfile.co/abc123".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::WebRequest { .. }]));
//! # Ok::<(), zsfile::ZsfileError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, Tab};
pub use domain::{Provider, Result, ValidationError, ZsfileError};
pub use ui::Theme;

use api::{ApiClient, DEFAULT_BASE_URL};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL. Default: [`DEFAULT_BASE_URL`].
    pub api_base_url: String,

    /// Initial search provider. Default: `sfile`.
    pub default_source: Provider,

    /// Command that opens a direct link ("navigate" downloads). Default: `xdg-open`.
    pub opener: String,

    /// Program run in floating panes for downloads. Default: `curl`.
    pub downloader: String,

    /// Working directory for download panes; the pane's default when unset.
    pub download_dir: Option<String>,

    /// Clipboard command and its leading arguments; the copied text is
    /// appended as the last argument. Default: `wl-copy`.
    pub copy_command: Vec<String>,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file (`~` maps to `/host`).
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `info`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            default_source: Provider::Sfile,
            opener: "xdg-open".to_string(),
            downloader: "curl".to_string(),
            download_dir: None,
            copy_command: vec!["wl-copy".to_string()],
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses typed values from Zellij's string map, falling back to defaults
    /// for missing, blank or unrecognized values.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zsfile::{Config, Provider};
    ///
    /// let map = BTreeMap::from([
    ///     ("default_source".to_string(), "simfile".to_string()),
    ///     ("copy_command".to_string(), "xclip -selection clipboard".to_string()),
    /// ]);
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.default_source, Provider::Simfile);
    /// assert_eq!(config.copy_command, ["xclip", "-selection", "clipboard"]);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let default_source = match get("default_source") {
            Some(source) => Provider::from_source(&source).unwrap_or_else(|| {
                tracing::warn!(source = %source, "unknown default_source, using sfile");
                defaults.default_source
            }),
            None => defaults.default_source,
        };

        let copy_command = get("copy_command")
            .map(|cmd| cmd.split_whitespace().map(String::from).collect::<Vec<_>>())
            .unwrap_or(defaults.copy_command);

        Self {
            api_base_url: get("api_base_url").unwrap_or(defaults.api_base_url),
            default_source,
            opener: get("opener").unwrap_or(defaults.opener),
            downloader: get("downloader").unwrap_or(defaults.downloader),
            download_dir: get("download_dir"),
            copy_command,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level").unwrap_or(defaults.trace_level),
        }
    }
}

/// Builds the initial [`AppState`] for `config`.
///
/// An invalid `api_base_url` or theme is logged and replaced by the default.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zsfile plugin");

    let api = ApiClient::new(&config.api_base_url).unwrap_or_else(|e| {
        tracing::warn!(api_base_url = %config.api_base_url, error = %e, "invalid api_base_url, using default");
        ApiClient::default()
    });

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(api, config.default_source, theme)
}
