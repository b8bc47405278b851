//! Loader / error / notice line.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusLine;

/// Renders the status line, or clears the row when there is none.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (color, icon, text) = match status {
        Some(StatusLine::Loading(text)) => (&theme.colors.accent, "⟳", text),
        Some(StatusLine::Error(text)) => (&theme.colors.error_fg, "✗", text),
        Some(StatusLine::Notice(text)) => (&theme.colors.error_fg, "!", text),
        None => {
            print!("{}", " ".repeat(cols));
            return row + 1;
        }
    };

    let line = truncate(&format!("    {icon} {text}"), cols);
    print!("{}", Theme::fg(color));
    print_padded(&line, cols);
    print!("{}", Theme::reset());
    row + 1
}
