//! End-to-end controller flows driven through `handle_event` only.

use zsfile::api::ApiClient;
use zsfile::app::{DownloadPhase, Focus, RequestTag, SearchPhase};
use zsfile::domain::DownloadAction;
use zsfile::{handle_event, Action, AppState, Event, Provider, Tab, Theme};

const PAGE_ONE_OF_TWO: &str = r#"{
    "success": true,
    "data": [
        {"name": "alpha.apk", "url": "https://sfile.co/a1", "size": "1.2 MB", "downloads": "10"},
        {"name": "beta.apk", "url": "https://sfile.co/b2", "size": "3 MB"},
        {"name": "gamma.apk", "url": "https://sfile.co/c3", "size": "700 KB"}
    ],
    "totalResults": 6,
    "currentPage": 1,
    "pageCount": 2
}"#;

const PAGE_TWO_OF_TWO: &str = r#"{
    "success": true,
    "data": [{"name": "delta.apk", "url": "https://sfile.co/d4", "size": "9 MB"}],
    "totalResults": 6,
    "currentPage": 2,
    "pageCount": 2
}"#;

const SIMFILE_RESOLVED: &str = r#"{
    "success": true,
    "data": {
        "name": "tools/v2.zip",
        "size": "12 MB",
        "mimeType": "application/zip",
        "downloadUrl": "https://cdn.simfile.co/dl/xyz"
    },
    "cookies": "sid=abc; path=/"
}"#;

const SFILE_RESOLVED: &str = r#"{
    "success": true,
    "data": {"name": "beta.apk", "downloadUrl": "https://cdn.sfile.co/b2"}
}"#;

fn new_state() -> AppState {
    AppState::new(ApiClient::default(), Provider::Sfile, Theme::default())
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

fn fire(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn single_request(actions: &[Action]) -> (String, RequestTag) {
    match actions {
        [Action::WebRequest { url, tag }] => (url.clone(), *tag),
        other => panic!("expected exactly one web request, got {other:?}"),
    }
}

fn respond(state: &mut AppState, tag: RequestTag, body: &str) -> Vec<Action> {
    fire(
        state,
        Event::HttpResponse {
            tag,
            status: 200,
            body: body.as_bytes().to_vec(),
        },
    )
}

/// Searches for `query` and answers with `body`.
fn search_with(state: &mut AppState, query: &str, body: &str) {
    type_text(state, query);
    let (_, tag) = single_request(&fire(state, Event::Submit));
    respond(state, tag, body);
}

#[test]
fn search_submit_issues_exactly_one_request() {
    let mut state = new_state();
    type_text(&mut state, "apk mod");

    let (url, tag) = single_request(&fire(&mut state, Event::Submit));

    assert_eq!(
        url,
        "https://api-sfile-tools.vercel.app/api/search?query=apk+mod&page=1&source=sfile"
    );
    assert_eq!(tag.tab, Tab::Search);
    assert!(state.is_loading());

    let view = state.compute_viewmodel(40, 120);
    assert!(view.status.is_some());
}

#[test]
fn empty_query_and_invalid_url_send_nothing() {
    let mut state = new_state();
    assert!(fire(&mut state, Event::Submit).is_empty());
    assert!(state.search.panel.error.is_some());

    fire(&mut state, Event::SwitchTab);
    type_text(&mut state, "https://example.com/abc");
    assert!(fire(&mut state, Event::Submit).is_empty());
    assert!(state.download.panel.error.is_some());
    assert_eq!(state.download.phase, DownloadPhase::Idle);
    assert!(state.download.panel.pending.is_none());
}

#[test]
fn pagination_stops_at_both_ends() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);
    assert_eq!(state.search.phase, SearchPhase::Results);

    assert!(fire(&mut state, Event::PreviousPage).is_empty());

    let (url, tag) = single_request(&fire(&mut state, Event::NextPage));
    assert!(url.ends_with("query=apk&page=2&source=sfile"));
    respond(&mut state, tag, PAGE_TWO_OF_TWO);
    assert_eq!(state.search.page, 2);
    assert_eq!(state.search.entry_count(), 1);

    assert!(fire(&mut state, Event::NextPage).is_empty());
    let (url, _) = single_request(&fire(&mut state, Event::PreviousPage));
    assert!(url.ends_with("page=1&source=sfile"));
}

#[test]
fn page_turns_keep_the_submitted_query_and_source() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);

    fire(&mut state, Event::FocusInput);
    type_text(&mut state, "zzz");
    fire(&mut state, Event::ToggleSource);
    fire(&mut state, Event::FocusResults);

    let (url, _) = single_request(&fire(&mut state, Event::NextPage));
    assert!(url.ends_with("query=apk&page=2&source=sfile"));
}

#[test]
fn switching_tabs_resets_both_panels() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);
    let (_, tag) = single_request(&fire(&mut state, Event::NextPage));
    respond(&mut state, tag, PAGE_TWO_OF_TWO);
    assert_eq!(state.search.page, 2);

    fire(&mut state, Event::SwitchTab);
    assert_eq!(state.tab, Tab::Download);
    assert!(state.search.results.is_none());
    assert_eq!(state.search.phase, SearchPhase::Idle);
    assert_eq!(state.search.page, 1);
    assert!(state.search.query.is_empty());
    assert!(state.search.panel.input.is_empty());

    type_text(&mut state, "https://sfile.co/abc");
    let (_, stale) = single_request(&fire(&mut state, Event::Submit));

    fire(&mut state, Event::SwitchTab);
    assert_eq!(state.tab, Tab::Search);
    assert!(state.download.panel.input.is_empty());
    assert!(!state.is_loading());

    // The abandoned resolution must not surface anywhere.
    respond(&mut state, stale, SFILE_RESOLVED);
    assert!(state.download.panel.detail.is_none());
    assert_eq!(state.download.phase, DownloadPhase::Idle);
}

#[test]
fn switching_tabs_forgets_the_session_cookie() {
    let mut state = new_state();
    fire(&mut state, Event::SwitchTab);
    type_text(&mut state, "https://simfile.co/xyz");
    let (_, tag) = single_request(&fire(&mut state, Event::Submit));
    respond(&mut state, tag, SIMFILE_RESOLVED);
    assert_eq!(state.download.panel.last_cookies.as_deref(), Some("sid=abc; path=/"));

    fire(&mut state, Event::SwitchTab);
    assert!(state.download.panel.last_cookies.is_none());
    assert!(state.download.panel.detail.is_none());

    fire(&mut state, Event::SwitchTab);
    assert_eq!(state.tab, Tab::Download);
    assert!(state.download.panel.last_cookies.is_none());
    assert!(fire(&mut state, Event::StartDownload).is_empty());
}

#[test]
fn back_to_results_restores_list_without_request() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);
    fire(&mut state, Event::KeyDown);
    assert_eq!(state.search.selected_index, 1);

    let (url, tag) = single_request(&fire(&mut state, Event::OpenEntry));
    assert!(url.ends_with("api/download?url=https%3A%2F%2Fsfile.co%2Fb2"));
    assert_eq!(state.search.phase, SearchPhase::Resolving);

    // Further opens are ignored while resolving.
    assert!(fire(&mut state, Event::OpenEntry).is_empty());

    respond(&mut state, tag, SFILE_RESOLVED);
    assert_eq!(state.search.phase, SearchPhase::Detail);

    let actions = fire(&mut state, Event::BackToResults);
    assert!(actions.is_empty());
    assert_eq!(state.search.phase, SearchPhase::Results);
    assert_eq!(state.search.selected_index, 1);
    assert_eq!(state.search.panel.focus, Focus::Content);
    assert_eq!(state.search.entry_count(), 3);
}

#[test]
fn failed_resolution_keeps_results_and_reports_error() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);
    let (_, tag) = single_request(&fire(&mut state, Event::OpenEntry));

    fire(
        &mut state,
        Event::HttpResponse {
            tag,
            status: 502,
            body: Vec::new(),
        },
    );

    assert_eq!(state.search.phase, SearchPhase::Results);
    assert!(state.search.panel.error.is_some());
    assert_eq!(state.search.entry_count(), 3);
}

#[test]
fn copy_requests_source_url_and_confirmation_reverts() {
    let mut state = new_state();
    fire(&mut state, Event::SwitchTab);
    type_text(&mut state, "https://simfile.co/xyz");
    let (_, tag) = single_request(&fire(&mut state, Event::Submit));
    respond(&mut state, tag, SIMFILE_RESOLVED);

    let actions = fire(&mut state, Event::CopySourceUrl);
    assert_eq!(
        actions,
        vec![Action::CopyToClipboard {
            text: "https://simfile.co/xyz".to_string()
        }]
    );

    let actions = fire(&mut state, Event::ClipboardResult { success: true });
    assert!(matches!(actions.as_slice(), [Action::ScheduleTimer(_)]));
    assert!(state.copy_confirmed());

    let (render, _) = handle_event(&mut state, &Event::CopyConfirmationExpired).unwrap();
    assert!(render);
    assert!(!state.copy_confirmed());
}

#[test]
fn only_the_latest_search_response_is_applied() {
    let mut state = new_state();
    type_text(&mut state, "first");
    let (_, first) = single_request(&fire(&mut state, Event::Submit));

    fire(&mut state, Event::Clear);
    type_text(&mut state, "second");
    let (_, second) = single_request(&fire(&mut state, Event::Submit));
    assert_ne!(first, second);

    respond(&mut state, second, PAGE_TWO_OF_TWO);
    respond(&mut state, first, PAGE_ONE_OF_TWO);

    assert_eq!(state.search.query, "second");
    assert_eq!(state.search.entry_count(), 1);
    assert_eq!(state.search.page, 2);
}

#[test]
fn simfile_with_cookie_downloads_through_proxy() {
    let mut state = new_state();
    fire(&mut state, Event::SwitchTab);
    type_text(&mut state, "https://simfile.co/xyz");
    let (_, tag) = single_request(&fire(&mut state, Event::Submit));
    respond(&mut state, tag, SIMFILE_RESOLVED);
    assert_eq!(state.download.phase, DownloadPhase::Detail);

    let actions = fire(&mut state, Event::StartDownload);
    let [Action::Download(DownloadAction::Proxy { url, file_name })] = actions.as_slice() else {
        panic!("expected proxy download, got {actions:?}");
    };
    assert!(url.starts_with("https://api-sfile-tools.vercel.app/api/get-download?url="));
    assert!(url.contains("cookies=sid%3Dabc"));
    assert_eq!(file_name, "tools_v2.zip");
}

#[test]
fn sfile_downloads_open_the_direct_link() {
    let mut state = new_state();
    search_with(&mut state, "apk", PAGE_ONE_OF_TWO);
    let (_, tag) = single_request(&fire(&mut state, Event::OpenEntry));
    respond(&mut state, tag, SFILE_RESOLVED);

    let actions = fire(&mut state, Event::StartDownload);
    assert_eq!(
        actions,
        vec![Action::Download(DownloadAction::Navigate {
            url: "https://cdn.sfile.co/b2".to_string()
        })]
    );
}
