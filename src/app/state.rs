//! Application state container.
//!
//! [`AppState`] owns everything the controller knows: the active tab, one
//! panel per tab, the API client used to build request URLs, the theme and
//! the request generation counter. Nothing here is persisted; every field is
//! reset when the user clears a form or switches tabs.
//!
//! # Example
//!
//! ```rust
//! use zsfile::api::ApiClient;
//! use zsfile::app::{AppState, Tab};
//! use zsfile::domain::Provider;
//! use zsfile::ui::Theme;
//!
//! let state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
//! assert_eq!(state.tab, Tab::Search);
//! assert!(state.search.results.is_none());
//! ```

use super::modes::{DownloadPhase, Focus, SearchPhase, Tab};
use super::request::{PendingRequest, RequestTag};
use crate::api::{ApiClient, Endpoint};
use crate::domain::{FileEntry, Provider, ResolvedFile, SearchResults};
use crate::ui::theme::Theme;

/// State shared by both tabs: an input field, an error surface and at most
/// one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Raw text of the input field.
    pub input: String,
    pub focus: Focus,
    /// Error surface of this tab.
    pub error: Option<String>,
    /// The request whose response this panel still accepts.
    pub pending: Option<PendingRequest>,
    /// The file currently shown in the detail view.
    pub detail: Option<ResolvedFile>,
    /// Session cookie from the last resolution, kept only for providers
    /// that issue one.
    pub last_cookies: Option<String>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            input: String::new(),
            focus: Focus::Input,
            error: None,
            pending: None,
            detail: None,
            last_cookies: None,
        }
    }
}

impl Panel {
    /// Forgets the current detail view and any cookie that came with it.
    pub fn clear_detail(&mut self) {
        self.detail = None;
        self.last_cookies = None;
    }
}

/// The search tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPanel {
    pub panel: Panel,
    pub phase: SearchPhase,
    /// Provider picked in the source selector.
    pub selector: Provider,
    /// Provider of the search in effect; pagination reuses it.
    pub source: Provider,
    /// Trimmed query of the search in effect.
    pub query: String,
    pub page: u32,
    pub total_pages: u32,
    pub results: Option<SearchResults>,
    /// Cursor position within `results`.
    pub selected_index: usize,
    /// Cursor position to restore when returning from the detail view.
    pub scroll_anchor: usize,
}

impl SearchPanel {
    #[must_use]
    pub fn new(selector: Provider) -> Self {
        Self {
            panel: Panel::default(),
            phase: SearchPhase::Idle,
            selector,
            source: selector,
            query: String::new(),
            page: 1,
            total_pages: 1,
            results: None,
            selected_index: 0,
            scroll_anchor: 0,
        }
    }

    /// Resets everything except the source selector.
    pub fn reset(&mut self) {
        *self = Self::new(self.selector);
    }

    /// Number of entries on the current page.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.entries.len())
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.results.as_ref()?.entries.get(self.selected_index)
    }

    /// Moves the cursor down by one entry, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Moves the cursor up by one entry, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let count = self.entry_count();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }
}

/// The direct-download tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPanel {
    pub panel: Panel,
    pub phase: DownloadPhase,
}

impl Default for DownloadPanel {
    fn default() -> Self {
        Self {
            panel: Panel::default(),
            phase: DownloadPhase::Idle,
        }
    }
}

impl DownloadPanel {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tab: Tab,
    pub search: SearchPanel,
    pub download: DownloadPanel,
    /// Builds endpoint URLs for outgoing requests.
    pub api: ApiClient,
    pub theme: Theme,
    /// Number of successful copies whose confirmation timer has not fired.
    pub copy_confirmations: usize,
    /// Transient notification, cleared by the next key press.
    pub notice: Option<String>,
    next_generation: u64,
}

impl AppState {
    /// Creates the initial state with the search tab active.
    #[must_use]
    pub fn new(api: ApiClient, default_source: Provider, theme: Theme) -> Self {
        Self {
            tab: Tab::Search,
            search: SearchPanel::new(default_source),
            download: DownloadPanel::default(),
            api,
            theme,
            copy_confirmations: 0,
            notice: None,
            next_generation: 0,
        }
    }

    #[must_use]
    pub const fn panel(&self, tab: Tab) -> &Panel {
        match tab {
            Tab::Search => &self.search.panel,
            Tab::Download => &self.download.panel,
        }
    }

    pub fn panel_mut(&mut self, tab: Tab) -> &mut Panel {
        match tab {
            Tab::Search => &mut self.search.panel,
            Tab::Download => &mut self.download.panel,
        }
    }

    /// Panel of the active tab.
    #[must_use]
    pub const fn active_panel(&self) -> &Panel {
        self.panel(self.tab)
    }

    pub fn active_panel_mut(&mut self) -> &mut Panel {
        self.panel_mut(self.tab)
    }

    /// Whether the active tab is waiting for a response.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        match self.tab {
            Tab::Search => self.search.phase.is_loading(),
            Tab::Download => matches!(self.download.phase, DownloadPhase::Resolving),
        }
    }

    /// Whether the copy control currently reads as confirmed.
    #[must_use]
    pub const fn copy_confirmed(&self) -> bool {
        self.copy_confirmations > 0
    }

    /// Allocates a fresh tag. Generations are unique across both tabs.
    pub fn issue_tag(&mut self, tab: Tab, endpoint: Endpoint) -> RequestTag {
        self.next_generation += 1;
        RequestTag {
            tab,
            endpoint,
            generation: self.next_generation,
        }
    }

    /// Resets the active panel, keeping the source selector.
    pub fn clear_active(&mut self) {
        match self.tab {
            Tab::Search => self.search.reset(),
            Tab::Download => self.download.reset(),
        }
    }

    /// Activates the other tab with both panels reset.
    ///
    /// Pending requests are dropped with the panels, so their responses no
    /// longer match and are discarded on arrival.
    pub fn switch_tab(&mut self) {
        self.search.reset();
        self.download.reset();
        self.tab = self.tab.next();
        tracing::debug!(tab = self.tab.as_str(), "switched tab");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchResults;

    fn entry(name: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            url: format!("https://sfile.co/{name}"),
            size: "1 MB".to_string(),
            date: None,
            downloads: None,
            icon: None,
        }
    }

    fn with_results(n: usize) -> SearchPanel {
        let mut panel = SearchPanel::new(Provider::Sfile);
        panel.results = Some(SearchResults {
            entries: (0..n).map(|i| entry(&format!("f{i}"))).collect(),
            query: "f".to_string(),
            source: Provider::Sfile,
            total_results: n as u64,
            current_page: 1,
            page_count: 1,
        });
        panel
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut panel = with_results(3);
        panel.move_selection_up();
        assert_eq!(panel.selected_index, 2);
        panel.move_selection_down();
        assert_eq!(panel.selected_index, 0);
        panel.move_selection_down();
        assert_eq!(panel.selected_entry().map(|e| e.name.as_str()), Some("f1"));
    }

    #[test]
    fn selection_is_noop_without_results() {
        let mut panel = SearchPanel::new(Provider::Sfile);
        panel.move_selection_down();
        panel.move_selection_up();
        assert_eq!(panel.selected_index, 0);
        assert!(panel.selected_entry().is_none());
    }

    #[test]
    fn reset_keeps_selector() {
        let mut panel = SearchPanel::new(Provider::Sfile);
        panel.selector = Provider::Simfile;
        panel.query = "apk".to_string();
        panel.page = 4;
        panel.reset();
        assert_eq!(panel.selector, Provider::Simfile);
        assert_eq!(panel.source, Provider::Simfile);
        assert!(panel.query.is_empty());
        assert_eq!(panel.page, 1);
    }

    #[test]
    fn generations_are_monotonic_across_tabs() {
        let mut state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
        let a = state.issue_tag(Tab::Search, Endpoint::Search);
        let b = state.issue_tag(Tab::Download, Endpoint::Resolve);
        assert!(b.generation > a.generation);
    }
}
