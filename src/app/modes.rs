//! Tab, focus and phase types for the two panels.
//!
//! Each tab runs the same small state machine:
//!
//! ```text
//! idle → loading → {results | empty | error}
//! results → detail (open entry) → results (back)
//! any → idle (clear / tab switch)
//! ```
//!
//! The search tab walks the whole machine; the download tab only has the
//! resolve half of it.

/// The two mutually exclusive modes of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    /// Search the provider index and open results.
    Search,
    /// Resolve a pasted provider page URL directly.
    Download,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Search, Self::Download];

    /// The other tab.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Download,
            Self::Download => Self::Search,
        }
    }

    /// Label shown in the tab bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "File Search",
            Self::Download => "Direct Download",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Download => "download",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.as_str() == s)
    }
}

/// Where keyboard input goes within a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Characters edit the input field.
    Input,
    /// Keys act on the results list or the detail view.
    Content,
}

/// State of the search tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// A search request is in flight.
    Searching,
    /// A non-empty result page is shown.
    Results,
    /// The last search returned no entries.
    Empty,
    /// A resolution started from the results list is in flight.
    Resolving,
    /// A resolved file from the results list is shown.
    Detail,
    /// The last operation failed; the error surface carries the message.
    Failed,
}

impl SearchPhase {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Searching | Self::Resolving)
    }
}

/// State of the direct-download tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Resolving,
    Detail,
    Failed,
}
