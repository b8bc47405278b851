//! Title bar and tab bar.

use crate::ui::helpers::{position_cursor, print_centered, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, TabInfo};

/// Renders the centered, bold title bar. Returns the next free row.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print_centered(&header.title, cols);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the tab bar.
///
/// ```text
///   [ File Search ]   Direct Download          Tab: switch
/// ```
///
/// The active tab is bracketed and drawn in the accent color.
pub fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let mut used = 0;

    print!("  ");
    used += 2;
    for tab in tabs {
        let label = if tab.active {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
            format!("[ {} ]", tab.label)
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
            format!("  {}  ", tab.label)
        };
        print!("{label}{}   ", Theme::reset());
        used += width(&label) + 3;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
