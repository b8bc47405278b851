//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin shim (`main.rs`) and the api/domain/ui layers:
//!
//! ```text
//! Key press → Event → handle_event → state change → Vec<Action> → host call
//!                ↑                                                   ↓
//!                └──────────── host result (HTTP, clipboard, timer) ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Tab, focus and per-tab phase types
//! - [`request`]: Tags that pair host responses with pending requests
//! - [`state`]: Central application state container
//! - [`view`]: View model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod request;
pub mod state;
pub mod view;

pub use actions::{Action, TimerPurpose};
pub use handler::{handle_event, Event};
pub use modes::{DownloadPhase, Focus, SearchPhase, Tab};
pub use request::{PendingRequest, RequestTag, RequestTarget};
pub use state::{AppState, DownloadPanel, Panel, SearchPanel};
