//! View model computation.
//!
//! Projects [`AppState`] onto a [`UIViewModel`] for a given terminal size.
//! Rendering never looks at the state directly.

use super::modes::{DownloadPhase, Focus, SearchPhase, Tab};
use super::state::{AppState, Panel};
use crate::domain::file::format_count;
use crate::domain::{EntryIcon, FileEntry, Provider, ResolvedFile, SearchResults};
use crate::ui::helpers::truncate;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, PaginationInfo,
    PanelBody, ResultsInfo, SourceSelectorInfo, StatusLine, TabInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by everything except result rows when a result page is shown.
pub const RESULTS_CHROME_ROWS: usize = 17;

/// Width of the fixed metadata columns plus the row prefix.
pub const META_COLUMNS_WIDTH: usize = 44;

const MIN_NAME_WIDTH: usize = 12;

impl AppState {
    /// Computes a renderable UI view model from current state and terminal dimensions.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let panel = self.active_panel();

        UIViewModel {
            header: HeaderInfo {
                title: " zsfile · Sfile.co & Simfile.co downloads ".to_string(),
            },
            tabs: Tab::ALL
                .into_iter()
                .map(|tab| TabInfo {
                    label: tab.label().to_string(),
                    active: tab == self.tab,
                })
                .collect(),
            input: self.compute_input_bar(panel),
            source_selector: (self.tab == Tab::Search).then(|| SourceSelectorInfo {
                options: Provider::ALL
                    .into_iter()
                    .map(|p| (p.display_name().to_string(), p == self.search.selector))
                    .collect(),
            }),
            status: self.compute_status(panel),
            body: self.compute_body(rows, cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_input_bar(&self, panel: &Panel) -> InputBarInfo {
        let (label, placeholder) = match self.tab {
            Tab::Search => ("Search", "Enter a file name..."),
            Tab::Download => ("URL", "https://sfile.co/... or https://simfile.co/..."),
        };
        InputBarInfo {
            label: label.to_string(),
            value: panel.input.clone(),
            placeholder: placeholder.to_string(),
            focused: panel.focus == Focus::Input,
            show_clear: !panel.input.trim().is_empty(),
        }
    }

    fn compute_status(&self, panel: &Panel) -> Option<StatusLine> {
        let loader = match (self.tab, self.search.phase, self.download.phase) {
            (Tab::Search, SearchPhase::Searching, _) => Some(format!(
                "Searching for \"{}\" on {}...",
                self.search.query,
                self.search.source.display_name()
            )),
            (Tab::Search, SearchPhase::Resolving, _) | (Tab::Download, _, DownloadPhase::Resolving) => {
                Some("Getting download link...".to_string())
            }
            _ => None,
        };

        loader
            .map(StatusLine::Loading)
            .or_else(|| panel.error.clone().map(StatusLine::Error))
            .or_else(|| self.notice.clone().map(StatusLine::Notice))
    }

    fn compute_body(&self, rows: usize, cols: usize) -> PanelBody {
        match self.tab {
            Tab::Search => match self.search.phase {
                SearchPhase::Results => self
                    .search
                    .results
                    .as_ref()
                    .map_or(PanelBody::Blank, |r| PanelBody::Results(self.compute_results(r, rows, cols))),
                SearchPhase::Empty => PanelBody::Empty(EmptyState {
                    message: format!("No files found matching \"{}\"", self.search.query),
                    subtitle: "Try another query or switch the source".to_string(),
                }),
                SearchPhase::Detail => self
                    .search
                    .panel
                    .detail
                    .as_ref()
                    .map_or(PanelBody::Blank, |file| {
                        PanelBody::Detail(self.compute_detail(file, &self.search.panel, true))
                    }),
                SearchPhase::Idle | SearchPhase::Searching | SearchPhase::Resolving | SearchPhase::Failed => {
                    PanelBody::Blank
                }
            },
            Tab::Download => match (&self.download.phase, &self.download.panel.detail) {
                (DownloadPhase::Detail, Some(file)) => {
                    PanelBody::Detail(self.compute_detail(file, &self.download.panel, false))
                }
                _ => PanelBody::Blank,
            },
        }
    }

    fn compute_results(&self, results: &SearchResults, rows: usize, cols: usize) -> ResultsInfo {
        let total = results.entries.len();
        let available_rows = rows.saturating_sub(RESULTS_CHROME_ROWS).max(1);
        let selected = self.search.selected_index.min(total.saturating_sub(1));

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let name_width = cols.saturating_sub(META_COLUMNS_WIDTH).max(MIN_NAME_WIDTH);
        let matcher = SkimMatcherV2::default();

        let items = results.entries[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                let is_selected = visible_start + offset == selected;
                compute_display_item(entry, &results.query, name_width, is_selected, &matcher)
            })
            .collect();

        ResultsInfo {
            summary: format!(
                "Found {} result(s) for \"{}\"",
                format_count(results.total_results),
                results.query
            ),
            items,
            selected_index: selected - visible_start,
            pagination: PaginationInfo {
                label: format!("Page {} of {}", results.current_page, results.page_count),
                previous_enabled: results.has_previous(),
                next_enabled: results.has_next(),
            },
        }
    }

    fn compute_detail(&self, file: &ResolvedFile, panel: &Panel, can_go_back: bool) -> DetailInfo {
        let info = &file.info;
        let specs = [
            ("Size", &info.size),
            ("Type", &info.mime_type),
            ("Uploaded", &info.uploaded),
            ("Downloads", &info.downloads),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| (label.to_string(), v.clone())))
        .collect();

        let download_label = self
            .api
            .download_action(file, panel.last_cookies.as_deref())
            .map_or("Download File", |action| action.label());

        DetailInfo {
            title: info.name.clone(),
            specs,
            source_url: file.source_url.clone(),
            copy_label: if self.copy_confirmed() { "Copied!" } else { "Copy" }.to_string(),
            download_label: download_label.to_string(),
            can_go_back: can_go_back && self.search.results.is_some(),
            resolved_age: format!("resolved {}", file.age(chrono::Utc::now().timestamp())),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.tab {
            Tab::Search => match (self.search.phase, self.search.panel.focus) {
                (SearchPhase::Results, Focus::Content) => {
                    "j/k: navigate  Enter: open  h/l: page  /: edit query  Tab: switch  Esc: clear  q: quit"
                }
                (SearchPhase::Detail, _) => {
                    "d/Enter: download  c: copy url  b: back  Tab: switch  Esc: clear  q: quit"
                }
                (SearchPhase::Results, Focus::Input) => {
                    "Enter: search  ←/→: source  ↓: results  Tab: switch  Esc: clear"
                }
                (_, Focus::Content) => "/: edit query  Tab: switch  Esc: clear  q: quit",
                _ => "Enter: search  ←/→: source  Tab: switch  Esc: clear",
            },
            Tab::Download => match self.download.phase {
                DownloadPhase::Detail => {
                    "d/Enter: download  c: copy url  Tab: switch  Esc: clear  q: quit"
                }
                _ => "Enter: get link  Tab: switch  Esc: clear",
            },
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn compute_display_item(
    entry: &FileEntry,
    query: &str,
    name_width: usize,
    is_selected: bool,
    matcher: &SkimMatcherV2,
) -> DisplayItem {
    let name = truncate(&entry.name, name_width);
    let visible_chars = if name.chars().count() < entry.name.chars().count() {
        name_width.saturating_sub(3)
    } else {
        name_width
    };

    let highlight_ranges = compute_highlight_ranges(&entry.name, query, matcher)
        .into_iter()
        .filter(|&(start, _)| start < visible_chars)
        .map(|(start, end)| (start, end.min(visible_chars)))
        .collect();

    DisplayItem {
        name,
        kind: entry
            .icon
            .as_ref()
            .and_then(EntryIcon::label)
            .unwrap_or_else(|| "-".to_string()),
        size: entry.size.clone(),
        date: entry.date.clone().unwrap_or_else(|| "-".to_string()),
        downloads: entry.downloads.clone().unwrap_or_else(|| "-".to_string()),
        is_selected,
        highlight_ranges,
    }
}

/// Coalesces the matcher's character indices into `(start, end)` runs.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::domain::{DownloadInfo, SearchResults};
    use crate::ui::theme::Theme;

    fn results(n: usize, current_page: u32, page_count: u32) -> SearchResults {
        SearchResults {
            entries: (0..n)
                .map(|i| FileEntry {
                    name: format!("file-{i}.apk"),
                    url: format!("https://sfile.co/id{i}"),
                    size: "1 MB".to_string(),
                    date: None,
                    downloads: Some("3".to_string()),
                    icon: None,
                })
                .collect(),
            query: "apk".to_string(),
            source: Provider::Sfile,
            total_results: 1204,
            current_page,
            page_count,
        }
    }

    fn showing(results: SearchResults) -> AppState {
        let mut state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
        state.search.query = results.query.clone();
        state.search.page = results.current_page;
        state.search.total_pages = results.page_count;
        state.search.results = Some(results);
        state.search.phase = SearchPhase::Results;
        state.search.panel.focus = Focus::Content;
        state
    }

    #[test]
    fn middle_page_enables_both_controls() {
        let vm = showing(results(3, 2, 3)).compute_viewmodel(40, 100);
        let PanelBody::Results(info) = vm.body else {
            panic!("expected results");
        };
        assert_eq!(info.pagination.label, "Page 2 of 3");
        assert!(info.pagination.previous_enabled);
        assert!(info.pagination.next_enabled);
        assert_eq!(info.summary, "Found 1,204 result(s) for \"apk\"");
    }

    #[test]
    fn boundary_pages_disable_controls() {
        let PanelBody::Results(first) = showing(results(3, 1, 3)).compute_viewmodel(40, 100).body else {
            panic!("expected results");
        };
        assert!(!first.pagination.previous_enabled);
        assert!(first.pagination.next_enabled);

        let PanelBody::Results(last) = showing(results(3, 3, 3)).compute_viewmodel(40, 100).body else {
            panic!("expected results");
        };
        assert!(last.pagination.previous_enabled);
        assert!(!last.pagination.next_enabled);
    }

    #[test]
    fn window_follows_selection() {
        let mut state = showing(results(50, 1, 1));
        state.search.selected_index = 40;
        let PanelBody::Results(info) = state.compute_viewmodel(RESULTS_CHROME_ROWS + 10, 100).body else {
            panic!("expected results");
        };
        assert_eq!(info.items.len(), 10);
        assert!(info.items[info.selected_index].is_selected);
        assert_eq!(info.items[info.selected_index].name, "file-40.apk");
    }

    #[test]
    fn empty_phase_shows_message_without_pagination() {
        let mut state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
        state.search.query = "nothing".to_string();
        state.search.total_pages = 9;
        state.search.phase = SearchPhase::Empty;
        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(
            vm.body,
            PanelBody::Empty(EmptyState {
                message: "No files found matching \"nothing\"".to_string(),
                subtitle: "Try another query or switch the source".to_string(),
            })
        );
    }

    #[test]
    fn loader_names_the_source() {
        let mut state = AppState::new(ApiClient::default(), Provider::Simfile, Theme::default());
        state.search.query = "apk".to_string();
        state.search.phase = SearchPhase::Searching;
        let vm = state.compute_viewmodel(40, 100);
        assert_eq!(
            vm.status,
            Some(StatusLine::Loading("Searching for \"apk\" on Simfile.co...".to_string()))
        );
    }

    #[test]
    fn detail_omits_absent_fields() {
        let mut state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
        state.tab = Tab::Download;
        state.download.phase = DownloadPhase::Detail;
        state.download.panel.detail = Some(ResolvedFile {
            info: DownloadInfo {
                name: "a.zip".to_string(),
                size: Some("4 MB".to_string()),
                mime_type: None,
                uploaded: None,
                downloads: Some("12".to_string()),
                download_url: "https://cdn.example/a.zip".to_string(),
                cookies: None,
            },
            source_url: "https://sfile.co/abc".to_string(),
            provider: Provider::Sfile,
            resolved_at: chrono::Utc::now().timestamp(),
        });
        state.copy_confirmations = 1;

        let PanelBody::Detail(detail) = state.compute_viewmodel(40, 100).body else {
            panic!("expected detail");
        };
        assert_eq!(
            detail.specs,
            vec![
                ("Size".to_string(), "4 MB".to_string()),
                ("Downloads".to_string(), "12".to_string())
            ]
        );
        assert_eq!(detail.copy_label, "Copied!");
        assert_eq!(detail.download_label, "Download File");
        assert!(!detail.can_go_back);
        assert_eq!(detail.resolved_age, "resolved just now");
    }

    #[test]
    fn type_column_comes_from_icon() {
        let mut page = results(2, 1, 1);
        page.entries[0].icon = EntryIcon::from_raw("<div class=\"apk\"></div>");
        let PanelBody::Results(info) = showing(page).compute_viewmodel(40, 100).body else {
            panic!("expected results");
        };
        assert_eq!(info.items[0].kind, "apk");
        assert_eq!(info.items[1].kind, "-");
    }

    #[test]
    fn highlight_runs_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("file-1.apk", "apk", &matcher), vec![(7, 10)]);
        assert!(compute_highlight_ranges("zip", "apk", &matcher).is_empty());
    }
}
