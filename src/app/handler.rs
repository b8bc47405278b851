//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place state changes. It receives user input
//! already mapped from keys by the plugin shim, or a host result (HTTP
//! response, clipboard outcome, timer), mutates [`AppState`] and returns
//! whether a re-render is needed together with the side effects to perform.
//!
//! Requests are fire-and-forget from the handler's point of view: issuing one
//! records a [`PendingRequest`] on the owning panel, and the response is only
//! applied if its tag still matches that record.
//!
//! # Example
//!
//! ```rust
//! use zsfile::api::ApiClient;
//! use zsfile::app::{handle_event, Action, AppState, Event};
//! use zsfile::domain::Provider;
//! use zsfile::ui::Theme;
//!
//! let mut state = AppState::new(ApiClient::default(), Provider::Sfile, Theme::default());
//! for c in "apk".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::WebRequest { .. }]));
//! # Ok::<(), zsfile::ZsfileError>(())
//! ```

use super::actions::{Action, TimerPurpose};
use super::modes::{DownloadPhase, Focus, SearchPhase, Tab};
use super::request::{PendingRequest, RequestTag, RequestTarget};
use super::state::AppState;
use crate::api::{decode_resolve, decode_search, Endpoint, SearchOutcome};
use crate::domain::{Provider, Result, ValidationError};
use zellij_tile::prelude::PermissionType;

/// Notification shown when the clipboard command fails.
pub const CLIPBOARD_FAILURE: &str = "Failed to copy to clipboard";

/// Events triggered by user input or host results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Activates the other tab, resetting both panels.
    SwitchTab,
    /// Appends a character to the focused input field.
    Char(char),
    /// Removes the last character from the focused input field.
    Backspace,
    /// Submits the active tab's input (search query or page URL).
    Submit,
    /// Resets the active tab.
    Clear,
    /// Flips the search source selector.
    ToggleSource,
    /// Moves keyboard focus from the query field to the results list.
    FocusResults,
    /// Moves keyboard focus back to the query field.
    FocusInput,
    /// Moves the results cursor down (wraps).
    KeyDown,
    /// Moves the results cursor up (wraps).
    KeyUp,
    PreviousPage,
    NextPage,
    /// Resolves the highlighted search entry.
    OpenEntry,
    /// Returns from the detail view to the stored result list.
    BackToResults,
    /// Runs the provider-specific download for the shown file.
    StartDownload,
    /// Copies the shown file's source URL.
    CopySourceUrl,
    /// Hides the plugin.
    CloseFocus,

    /// A host web request finished.
    ///
    /// Transport failures arrive as non-2xx statuses.
    HttpResponse {
        tag: RequestTag,
        status: u16,
        body: Vec<u8>,
    },
    /// The clipboard command exited.
    ClipboardResult {
        success: bool,
    },
    /// A copy confirmation timer fired.
    CopyConfirmationExpired,
    /// Reports granted Zellij permissions after the permission request.
    PermissionsResult {
        granted: Vec<PermissionType>,
    },
}

impl Event {
    /// Whether this event came from a key press.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::HttpResponse { .. }
                | Self::ClipboardResult { .. }
                | Self::CopyConfirmationExpired
                | Self::PermissionsResult { .. }
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the view changed and must be re-rendered.
///
/// # Errors
///
/// Returns [`crate::ZsfileError::Request`] when a request URL cannot be built
/// from the configured API base.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let had_notice = if event.is_user_input() {
        state.notice.take().is_some()
    } else {
        false
    };

    let (render, actions) = match event {
        Event::SwitchTab => {
            state.switch_tab();
            (true, vec![])
        }
        Event::Char(c) => {
            let panel = state.active_panel_mut();
            if panel.focus == Focus::Input {
                panel.input.push(*c);
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::Backspace => {
            let panel = state.active_panel_mut();
            if panel.focus == Focus::Input && panel.input.pop().is_some() {
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::Submit => match state.tab {
            Tab::Search => submit_search(state)?,
            Tab::Download => submit_download(state)?,
        },
        Event::Clear => {
            state.clear_active();
            (true, vec![])
        }
        Event::ToggleSource => {
            if state.tab != Tab::Search {
                return Ok((had_notice, vec![]));
            }
            state.search.selector = state.search.selector.toggle();
            tracing::debug!(selector = %state.search.selector, "source toggled");
            (true, vec![])
        }
        Event::FocusResults => {
            let search = &mut state.search;
            if state.tab == Tab::Search && search.phase == SearchPhase::Results {
                search.panel.focus = Focus::Content;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::FocusInput => {
            if state.tab == Tab::Search && state.search.panel.focus != Focus::Input {
                state.search.panel.focus = Focus::Input;
                (true, vec![])
            } else {
                (false, vec![])
            }
        }
        Event::KeyDown | Event::KeyUp => {
            let search = &mut state.search;
            if state.tab != Tab::Search || search.phase != SearchPhase::Results {
                return Ok((had_notice, vec![]));
            }
            if matches!(event, Event::KeyDown) {
                search.move_selection_down();
            } else {
                search.move_selection_up();
            }
            (true, vec![])
        }
        Event::PreviousPage => turn_page(state, -1)?,
        Event::NextPage => turn_page(state, 1)?,
        Event::OpenEntry => open_entry(state)?,
        Event::BackToResults => back_to_results(state),
        Event::StartDownload => {
            let panel = state.active_panel();
            let Some(file) = &panel.detail else {
                return Ok((had_notice, vec![]));
            };
            let action = state.api.download_action(file, panel.last_cookies.as_deref())?;
            tracing::info!(
                provider = %file.provider,
                method = action.label(),
                "starting download"
            );
            (false, vec![Action::Download(action)])
        }
        Event::CopySourceUrl => match &state.active_panel().detail {
            Some(file) => (
                false,
                vec![Action::CopyToClipboard {
                    text: file.source_url.clone(),
                }],
            ),
            None => (false, vec![]),
        },
        Event::CloseFocus => (false, vec![Action::CloseFocus]),

        Event::HttpResponse { tag, status, body } => apply_response(state, *tag, *status, body),
        Event::ClipboardResult { success: true } => {
            state.copy_confirmations += 1;
            (true, vec![Action::ScheduleTimer(TimerPurpose::CopyConfirmation)])
        }
        Event::ClipboardResult { success: false } => {
            tracing::warn!("clipboard command failed");
            state.notice = Some(CLIPBOARD_FAILURE.to_string());
            (true, vec![])
        }
        Event::CopyConfirmationExpired => {
            state.copy_confirmations = state.copy_confirmations.saturating_sub(1);
            (state.copy_confirmations == 0, vec![])
        }
        Event::PermissionsResult { granted } => {
            tracing::info!(granted = ?granted, "permissions result");
            (false, vec![])
        }
    };

    Ok((render || had_notice, actions))
}

fn submit_search(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let query = state.search.panel.input.trim().to_string();
    if query.is_empty() {
        state.search.panel.error = Some(ValidationError::EmptyQuery.to_string());
        return Ok((true, vec![]));
    }

    let search = &mut state.search;
    search.source = search.selector;
    search.query = query;
    search.page = 1;
    search.total_pages = 1;
    search.results = None;
    search.selected_index = 0;
    search.scroll_anchor = 0;
    search.panel.clear_detail();

    let action = request_search(state)?;
    Ok((true, vec![action]))
}

fn submit_download(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let url = state.download.panel.input.trim().to_string();
    let validated = if url.is_empty() {
        Err(ValidationError::EmptyUrl)
    } else {
        Provider::from_page_url(&url)
    };

    let provider = match validated {
        Ok(provider) => provider,
        Err(e) => {
            tracing::debug!(error = %e, "rejected page url");
            state.download.panel.error = Some(e.to_string());
            return Ok((true, vec![]));
        }
    };

    state.download.panel.clear_detail();
    state.download.phase = DownloadPhase::Resolving;
    let action = request_resolve(state, Tab::Download, url, provider)?;
    Ok((true, vec![action]))
}

/// Issues the search for the panel's current query, page and source.
fn request_search(state: &mut AppState) -> Result<Action> {
    let search = &state.search;
    let url = state.api.search_url(&search.query, search.page, search.source)?;
    let target = RequestTarget::Search {
        query: search.query.clone(),
        page: search.page,
        source: search.source,
    };

    let tag = state.issue_tag(Tab::Search, Endpoint::Search);
    let search = &mut state.search;
    search.phase = SearchPhase::Searching;
    search.panel.error = None;
    search.panel.pending = Some(PendingRequest { tag, target });

    tracing::info!(
        query = %search.query,
        page = search.page,
        source = %search.source,
        generation = tag.generation,
        "issuing search"
    );
    Ok(Action::WebRequest { url, tag })
}

fn request_resolve(
    state: &mut AppState,
    tab: Tab,
    page_url: String,
    provider: Provider,
) -> Result<Action> {
    let url = state.api.resolve_url(&page_url)?;
    let tag = state.issue_tag(tab, Endpoint::Resolve);

    tracing::info!(
        page_url = %page_url,
        provider = %provider,
        tab = tab.as_str(),
        generation = tag.generation,
        "issuing resolution"
    );

    let panel = state.panel_mut(tab);
    panel.error = None;
    panel.pending = Some(PendingRequest {
        tag,
        target: RequestTarget::Resolve { page_url, provider },
    });
    Ok(Action::WebRequest { url, tag })
}

fn turn_page(state: &mut AppState, delta: i8) -> Result<(bool, Vec<Action>)> {
    let search = &mut state.search;
    if state.tab != Tab::Search || search.phase != SearchPhase::Results {
        return Ok((false, vec![]));
    }

    let target = match delta {
        -1 if search.page > 1 => search.page - 1,
        1 if search.page < search.total_pages => search.page + 1,
        _ => {
            tracing::debug!(page = search.page, total = search.total_pages, "page control disabled");
            return Ok((false, vec![]));
        }
    };

    search.page = target;
    search.results = None;
    search.selected_index = 0;
    search.scroll_anchor = 0;

    let action = request_search(state)?;
    Ok((true, vec![action]))
}

fn open_entry(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let search = &mut state.search;
    if state.tab != Tab::Search || search.phase != SearchPhase::Results {
        return Ok((false, vec![]));
    }
    let (Some(entry), Some(results)) = (search.selected_entry(), &search.results) else {
        return Ok((false, vec![]));
    };

    let page_url = entry.url.clone();
    let provider = results.source;
    search.scroll_anchor = search.selected_index;
    search.phase = SearchPhase::Resolving;
    search.panel.clear_detail();

    let action = request_resolve(state, Tab::Search, page_url, provider)?;
    Ok((true, vec![action]))
}

fn back_to_results(state: &mut AppState) -> (bool, Vec<Action>) {
    let search = &mut state.search;
    if state.tab != Tab::Search || search.phase != SearchPhase::Detail || search.results.is_none() {
        return (false, vec![]);
    }

    search.panel.clear_detail();
    search.phase = SearchPhase::Results;
    search.selected_index = search.scroll_anchor.min(search.entry_count().saturating_sub(1));
    search.panel.focus = Focus::Content;
    (true, vec![])
}

fn apply_response(
    state: &mut AppState,
    tag: RequestTag,
    status: u16,
    body: &[u8],
) -> (bool, Vec<Action>) {
    let panel = state.panel_mut(tag.tab);
    if panel.pending.as_ref().map(|p| p.tag) != Some(tag) {
        tracing::debug!(
            tab = tag.tab.as_str(),
            endpoint = tag.endpoint.as_str(),
            generation = tag.generation,
            "discarding stale response"
        );
        return (false, vec![]);
    }
    let Some(pending) = panel.pending.take() else {
        return (false, vec![]);
    };

    match pending.target {
        RequestTarget::Search { query, source, .. } => {
            apply_search(state, decode_search(status, body, &query, source));
        }
        RequestTarget::Resolve { page_url, provider } => {
            let resolved_at = chrono::Utc::now().timestamp();
            let decoded = decode_resolve(status, body, &page_url, provider, resolved_at);
            apply_resolve(state, tag.tab, decoded);
        }
    }
    (true, vec![])
}

fn apply_search(
    state: &mut AppState,
    outcome: std::result::Result<SearchOutcome, crate::api::FetchError>,
) {
    let search = &mut state.search;
    match outcome {
        Ok(SearchOutcome::Found(results)) => {
            tracing::info!(
                entries = results.entries.len(),
                page = results.current_page,
                pages = results.page_count,
                "search results received"
            );
            search.page = results.current_page;
            search.total_pages = results.page_count;
            search.selected_index = 0;
            search.results = Some(results);
            search.phase = SearchPhase::Results;
            search.panel.focus = Focus::Content;
        }
        Ok(SearchOutcome::Empty) => {
            tracing::info!(query = %search.query, "search returned no entries");
            search.results = None;
            search.phase = SearchPhase::Empty;
            search.panel.focus = Focus::Input;
        }
        Err(e) => {
            tracing::warn!(error = %e, "search failed");
            search.results = None;
            search.panel.error = Some(e.user_message(Endpoint::Search));
            search.phase = SearchPhase::Failed;
            search.panel.focus = Focus::Input;
        }
    }
}

fn apply_resolve(
    state: &mut AppState,
    tab: Tab,
    decoded: std::result::Result<crate::domain::ResolvedFile, crate::api::FetchError>,
) {
    match decoded {
        Ok(file) => {
            tracing::info!(name = %file.info.name, provider = %file.provider, "download link resolved");
            let panel = state.panel_mut(tab);
            panel.last_cookies = if file.provider.issues_session_cookie() {
                file.info.cookies.clone()
            } else {
                None
            };
            panel.detail = Some(file);
            panel.focus = Focus::Content;
            match tab {
                Tab::Search => state.search.phase = SearchPhase::Detail,
                Tab::Download => state.download.phase = DownloadPhase::Detail,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, tab = tab.as_str(), "resolution failed");
            state.panel_mut(tab).error = Some(e.user_message(Endpoint::Resolve));
            match tab {
                Tab::Search if state.search.results.is_some() => {
                    state.search.phase = SearchPhase::Results;
                }
                Tab::Search => state.search.phase = SearchPhase::Failed,
                Tab::Download => state.download.phase = DownloadPhase::Failed,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::ui::theme::Theme;

    const ONE_PAGE: &str = r#"{"success": true, "data": [
        {"name": "alpha.apk", "url": "https://sfile.co/a1", "size": "1 MB"},
        {"name": "beta.apk", "url": "https://sfile.co/b2", "size": "2 MB"}
    ], "totalResults": 2, "currentPage": 1, "pageCount": 3}"#;

    fn state() -> AppState {
        AppState::new(ApiClient::default(), Provider::Sfile, Theme::default())
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn sent_tag(actions: &[Action]) -> RequestTag {
        match actions {
            [Action::WebRequest { tag, .. }] => *tag,
            other => panic!("expected one web request, got {other:?}"),
        }
    }

    fn respond(state: &mut AppState, tag: RequestTag, body: &str) {
        handle_event(
            state,
            &Event::HttpResponse { tag, status: 200, body: body.as_bytes().to_vec() },
        )
        .unwrap();
    }

    #[test]
    fn whitespace_query_is_rejected_without_request() {
        let mut state = state();
        type_text(&mut state, "   ");
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.search.panel.error.as_deref(), Some("Please enter a search query!"));
        assert!(state.search.panel.pending.is_none());
    }

    #[test]
    fn submit_sends_trimmed_query_with_selected_source() {
        let mut state = state();
        handle_event(&mut state, &Event::ToggleSource).unwrap();
        type_text(&mut state, "  apk  ");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let [Action::WebRequest { url, .. }] = actions.as_slice() else {
            panic!("expected request");
        };
        assert!(url.ends_with("api/search?query=apk&page=1&source=simfile"));
        assert_eq!(state.search.phase, SearchPhase::Searching);
    }

    #[test]
    fn results_focus_the_list() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, sent_tag(&actions), ONE_PAGE);
        assert_eq!(state.search.phase, SearchPhase::Results);
        assert_eq!(state.search.panel.focus, Focus::Content);
        assert_eq!(state.search.total_pages, 3);
    }

    #[test]
    fn previous_is_disabled_on_first_page() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, sent_tag(&actions), ONE_PAGE);

        let (_, actions) = handle_event(&mut state, &Event::PreviousPage).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.search.page, 1);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        let [Action::WebRequest { url, .. }] = actions.as_slice() else {
            panic!("expected request");
        };
        assert!(url.contains("page=2"));
        assert_eq!(state.search.page, 2);
    }

    #[test]
    fn response_for_other_generation_is_discarded() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let mut stale = sent_tag(&actions);
        stale.generation += 100;
        let (render, _) = handle_event(
            &mut state,
            &Event::HttpResponse { tag: stale, status: 200, body: ONE_PAGE.as_bytes().to_vec() },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.search.phase, SearchPhase::Searching);
    }

    #[test]
    fn failed_copy_sets_notice_until_next_key() {
        let mut state = state();
        handle_event(&mut state, &Event::ClipboardResult { success: false }).unwrap();
        assert_eq!(state.notice.as_deref(), Some(CLIPBOARD_FAILURE));
        let (render, _) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(render);
        assert!(state.notice.is_none());
    }

    #[test]
    fn overlapping_copies_keep_confirmation_until_last_timer() {
        let mut state = state();
        handle_event(&mut state, &Event::ClipboardResult { success: true }).unwrap();
        handle_event(&mut state, &Event::ClipboardResult { success: true }).unwrap();
        handle_event(&mut state, &Event::CopyConfirmationExpired).unwrap();
        assert!(state.copy_confirmed());
        handle_event(&mut state, &Event::CopyConfirmationExpired).unwrap();
        assert!(!state.copy_confirmed());
    }

    #[test]
    fn chars_are_ignored_while_list_is_focused() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, sent_tag(&actions), ONE_PAGE);
        type_text(&mut state, "zz");
        assert_eq!(state.search.panel.input, "apk");
    }

    #[test]
    fn empty_page_after_page_turn_returns_focus_to_input() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, sent_tag(&actions), ONE_PAGE);
        assert_eq!(state.search.panel.focus, Focus::Content);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        respond(&mut state, sent_tag(&actions), r#"{"success": true, "data": []}"#);

        assert_eq!(state.search.phase, SearchPhase::Empty);
        assert_eq!(state.search.panel.focus, Focus::Input);
        type_text(&mut state, "x");
        assert_eq!(state.search.panel.input, "apkx");
    }

    #[test]
    fn failed_page_turn_returns_focus_to_input() {
        let mut state = state();
        type_text(&mut state, "apk");
        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        respond(&mut state, sent_tag(&actions), ONE_PAGE);

        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        handle_event(
            &mut state,
            &Event::HttpResponse { tag: sent_tag(&actions), status: 500, body: vec![] },
        )
        .unwrap();

        assert_eq!(state.search.phase, SearchPhase::Failed);
        assert_eq!(state.search.panel.focus, Focus::Input);
        assert_eq!(
            state.compute_viewmodel(40, 100).footer.keybindings,
            "Enter: search  ←/→: source  Tab: switch  Esc: clear"
        );
    }
}
