//! Page indicator with previous/next controls.

use crate::ui::helpers::{position_cursor, print_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ Prev   Page 2 of 3   Next ›` centered; disabled controls are dimmed.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let prev = "‹ Prev (h)";
    let next = "(l) Next ›";
    let label = format!("   {}   ", pagination.label);
    let total = prev.chars().count() + label.chars().count() + next.chars().count();
    let padding = cols.saturating_sub(total) / 2;

    let control = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.accent)
        } else {
            format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
        }
    };

    position_cursor(row, 1);
    if cols < total {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print_centered(&pagination.label, cols);
        print!("{}", Theme::reset());
        return row + 1;
    }

    print!("{}", " ".repeat(padding));
    print!("{}{prev}{}", control(pagination.previous_enabled), Theme::reset());
    print!("{}{label}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
    print!("{}{next}{}", control(pagination.next_enabled), Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(padding + total)));
    row + 1
}
