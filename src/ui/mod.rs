//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering entry point
//! - [`components`]: Composable region renderers
//! - [`helpers`]: Cursor positioning, character-safe truncation, highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InputBarInfo, PaginationInfo,
    PanelBody, ResultsInfo, SourceSelectorInfo, StatusLine, TabInfo, UIViewModel,
};
