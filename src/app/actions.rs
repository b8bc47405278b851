//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>`
//! and the shim in `main.rs` turns each one into a Zellij API call
//! (`web_request`, `run_command`, `set_timeout`, ...).
//!
//! # Example
//!
//! ```rust
//! use zsfile::app::Action;
//!
//! let actions = vec![Action::CopyToClipboard { text: "https://sfile.co/abc".into() }];
//! assert_eq!(actions.len(), 1);
//! ```

use super::request::RequestTag;
use crate::domain::DownloadAction;

/// Delay before the "Copied!" confirmation reverts, in seconds.
pub const COPY_CONFIRMATION_SECS: f64 = 2.0;

/// Why a timer was scheduled.
///
/// Zellij timers only report their elapsed time, so each purpose owns a
/// distinct duration and fired timers are mapped back by duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    /// Revert the copy control after a successful copy.
    CopyConfirmation,
}

impl TimerPurpose {
    #[must_use]
    pub const fn seconds(self) -> f64 {
        match self {
            Self::CopyConfirmation => COPY_CONFIRMATION_SECS,
        }
    }

    /// Maps a fired timer's elapsed time back to its purpose.
    #[must_use]
    pub fn from_elapsed(elapsed: f64) -> Option<Self> {
        const TOLERANCE: f64 = 0.5;
        [Self::CopyConfirmation]
            .into_iter()
            .find(|p| (p.seconds() - elapsed).abs() < TOLERANCE)
    }
}

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET; the response comes back as
    /// [`Event::HttpResponse`](super::Event::HttpResponse) carrying `tag`.
    WebRequest {
        url: String,
        tag: RequestTag,
    },

    /// Places `text` on the system clipboard.
    CopyToClipboard {
        text: String,
    },

    /// Schedules a timer.
    ScheduleTimer(TimerPurpose),

    /// Performs a provider-specific download.
    Download(DownloadAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_map_back_by_duration() {
        assert_eq!(TimerPurpose::from_elapsed(2.0), Some(TimerPurpose::CopyConfirmation));
        assert_eq!(TimerPurpose::from_elapsed(2.1), Some(TimerPurpose::CopyConfirmation));
        assert_eq!(TimerPurpose::from_elapsed(10.0), None);
    }
}
