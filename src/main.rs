//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zsfile library and the Zellij plugin
//! system: keys become library [`Event`]s, host results come back as events,
//! and the returned [`Action`]s are turned into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: `WebAccess`, `RunCommands`, `OpenTerminalsOrPlugins`
//! 3. **Subscribe**: Key, `WebRequestResult`, `Timer`, `RunCommandResult`,
//!    `PermissionRequestResult`
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Host Calls
//!
//! - `Action::WebRequest` → `web_request` with the request tag as context
//! - `Action::CopyToClipboard` → `run_command` with the configured copy command
//! - `Action::ScheduleTimer` → `set_timeout`
//! - `Action::Download` → floating `curl` pane, or the opener via `run_command`
//! - `Action::CloseFocus` → `hide_self`
//!
//! # Keybindings
//!
//! Global:
//! - `Tab`: Switch tab
//! - `Esc`: Clear the active tab
//! - `Ctrl+n` / `Ctrl+p`: Move selection
//!
//! Typing (input focused):
//! - characters / `Backspace`: Edit input
//! - `Enter`: Submit
//! - `Left` / `Right`: Toggle search source
//! - `Down` / `Up`: Focus results
//!
//! Results list:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `h`/`Left`/`[`, `l`/`Right`/`]`: Previous / next page
//! - `Enter`: Open entry
//! - `/`: Return to the search input
//! - `q`: Close plugin
//!
//! Detail view:
//! - `Enter` / `d`: Download
//! - `c`: Copy source URL
//! - `b`: Back to results (search tab)
//! - `q`: Close plugin (search tab)

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use zellij_tile::prelude::*;
use zsfile::app::{Focus, RequestTag, SearchPhase, TimerPurpose};
use zsfile::domain::DownloadAction;
use zsfile::{handle_event, Action, Config, Event, Tab};

register_plugin!(State);

/// Context key marking why a command was run.
const PURPOSE_KEY: &str = "zsfile.purpose";
const PURPOSE_CLIPBOARD: &str = "clipboard";
const PURPOSE_OPEN: &str = "open";

const PERMISSIONS: [PermissionType; 3] = [
    PermissionType::WebAccess,
    PermissionType::RunCommands,
    PermissionType::OpenTerminalsOrPlugins,
];

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the configuration the host calls need.
struct State {
    app: zsfile::AppState,
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: zsfile::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zsfile::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            default_source = %config.default_source,
            "parsed configuration"
        );
        self.app = zsfile::initialize(&config);
        self.config = config;

        request_permission(&PERMISSIONS);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match RequestTag::from_context(&context) {
                    Some(tag) => Event::HttpResponse { tag, status, body },
                    None => {
                        tracing::debug!(status, "web response without request tag");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => match TimerPurpose::from_elapsed(elapsed) {
                Some(TimerPurpose::CopyConfirmation) => Event::CopyConfirmationExpired,
                None => {
                    tracing::debug!(elapsed, "timer with unknown purpose");
                    return false;
                }
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, context) => {
                match Self::map_command_result_event(exit_code, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = match status {
                    PermissionStatus::Granted => PERMISSIONS.to_vec(),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - requests and downloads will fail");
                        Vec::new()
                    }
                };
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zsfile::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current tab,
    /// focus and phase.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match key.bare_key {
            BareKey::Tab => return Some(Event::SwitchTab),
            BareKey::Esc => return Some(Event::Clear),
            _ => {}
        }

        let app = &self.app;
        if app.active_panel().focus == Focus::Input {
            return Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Left | BareKey::Right if app.tab == Tab::Search => Event::ToggleSource,
                BareKey::Down | BareKey::Up if app.tab == Tab::Search => Event::FocusResults,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        let in_detail = app.active_panel().detail.is_some();
        if in_detail {
            return Some(match key.bare_key {
                BareKey::Enter | BareKey::Char('d') => Event::StartDownload,
                BareKey::Char('c') => Event::CopySourceUrl,
                BareKey::Char('b') if app.tab == Tab::Search => Event::BackToResults,
                BareKey::Char('q') if app.tab == Tab::Search => Event::CloseFocus,
                _ => return None,
            });
        }

        if app.tab != Tab::Search {
            return None;
        }

        Some(match key.bare_key {
            BareKey::Enter if app.search.phase == SearchPhase::Results => Event::OpenEntry,
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h' | '[') => Event::PreviousPage,
            BareKey::Right | BareKey::Char('l' | ']') => Event::NextPage,
            BareKey::Char('/') => Event::FocusInput,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished command back to an event by its purpose context.
    ///
    /// Only clipboard commands feed back into the state; opener results are
    /// logged.
    fn map_command_result_event(
        exit_code: Option<i32>,
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        match context.get(PURPOSE_KEY).map(String::as_str) {
            Some(PURPOSE_CLIPBOARD) => {
                if exit_code != Some(0) {
                    tracing::debug!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(stderr),
                        "copy command failed"
                    );
                }
                Some(Event::ClipboardResult {
                    success: exit_code == Some(0),
                })
            }
            Some(PURPOSE_OPEN) => {
                if exit_code == Some(0) {
                    tracing::debug!("opener finished");
                } else {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(stderr),
                        "opener failed"
                    );
                }
                None
            }
            _ => None,
        }
    }

    fn purpose(purpose: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(PURPOSE_KEY.to_string(), purpose.to_string())])
    }

    fn open_download_pane(&self, args: Vec<String>) {
        let command = CommandToRun {
            path: PathBuf::from(&self.config.downloader),
            args,
            cwd: self.config.download_dir.as_ref().map(PathBuf::from),
        };
        open_command_pane_floating(command, None, BTreeMap::new());
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::WebRequest { url, tag } => {
                tracing::debug!(url = %url, generation = tag.generation, "sending web request");
                web_request(url, HttpVerb::Get, BTreeMap::new(), Vec::new(), tag.to_context());
            }
            Action::CopyToClipboard { text } => {
                let Some((program, leading)) = self.config.copy_command.split_first() else {
                    tracing::warn!("no copy command configured");
                    return;
                };
                let mut argv: Vec<&str> = Vec::with_capacity(leading.len() + 2);
                argv.push(program);
                argv.extend(leading.iter().map(String::as_str));
                argv.push(text);
                run_command(&argv, Self::purpose(PURPOSE_CLIPBOARD));
            }
            Action::ScheduleTimer(purpose) => set_timeout(purpose.seconds()),
            Action::Download(DownloadAction::Proxy { url, file_name }) => {
                self.open_download_pane(vec![
                    "-L".to_string(),
                    "-o".to_string(),
                    file_name.clone(),
                    url.clone(),
                ]);
            }
            Action::Download(DownloadAction::NewContext { url }) => {
                self.open_download_pane(vec![
                    "-L".to_string(),
                    "-O".to_string(),
                    "-J".to_string(),
                    url.clone(),
                ]);
            }
            Action::Download(DownloadAction::Navigate { url }) => {
                run_command(&[self.config.opener.as_str(), url.as_str()], Self::purpose(PURPOSE_OPEN));
            }
        }
    }
}
