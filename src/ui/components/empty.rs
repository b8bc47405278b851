//! Empty-result message.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message starting at `row`.
///
/// The message uses `empty_state_fg`; the subtitle is dimmed.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());
    row + 2
}
