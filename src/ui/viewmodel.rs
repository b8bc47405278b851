//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready text only: counts are already
//! formatted, names truncated, highlight ranges resolved and disabled
//! controls flagged.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub tabs: Vec<TabInfo>,
    pub input: InputBarInfo,
    /// Present on the search tab only.
    pub source_selector: Option<SourceSelectorInfo>,
    /// Status line: loader, error and notice, shown in that precedence.
    pub status: Option<StatusLine>,
    pub body: PanelBody,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// One entry of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub label: String,
    pub active: bool,
}

/// The input box of the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBarInfo {
    pub label: String,
    pub value: String,
    /// Shown dimmed while `value` is empty.
    pub placeholder: String,
    pub focused: bool,
    /// Whether the clear hint is shown (input holds non-whitespace text).
    pub show_clear: bool,
}

/// The search source radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSelectorInfo {
    /// `(label, selected)` per provider.
    pub options: Vec<(String, bool)>,
}

/// Single status line under the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading(String),
    Error(String),
    Notice(String),
}

/// Content area of the active tab. At most one of results and detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Blank,
    Results(ResultsInfo),
    Empty(EmptyState),
    Detail(DetailInfo),
}

/// A windowed page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsInfo {
    /// `Found 1,204 result(s) for "apk"`.
    pub summary: String,
    pub items: Vec<DisplayItem>,
    /// Index of the selected item within `items`.
    pub selected_index: usize,
    pub pagination: PaginationInfo,
}

/// One row of the results table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    /// File-type tag from the entry icon, `-` when unknown.
    pub kind: String,
    pub size: String,
    pub date: String,
    pub downloads: String,
    pub is_selected: bool,

    /// Character ranges to highlight (fuzzy match against the query).
    ///
    /// Each tuple is `(start_index, end_index)` in character indices of `name`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// `Page 2 of 3`.
    pub label: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Message shown when a search found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Metadata card of a resolved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    /// `(label, value)` rows; absent fields are omitted.
    pub specs: Vec<(String, String)>,
    pub source_url: String,
    /// `Copy` or `Copied!`.
    pub copy_label: String,
    pub download_label: String,
    /// Whether "back to results" is offered.
    pub can_go_back: bool,
    /// `resolved just now`, `resolved 5m ago`, ...
    pub resolved_age: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current tab and phase.
    pub keybindings: String,
}
