//! Top-level rendering entry point.
//!
//! Rendering is a two-step process: the state is projected onto a
//! [`UIViewModel`], then the view model is printed as ANSI output. Only the
//! second step touches stdout.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; Zellij hands the plugin a fresh frame.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel: UIViewModel = state.compute_viewmodel(rows, cols);

    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
