//! Shared rendering utilities.
//!
//! All width arithmetic works on characters, never bytes: file names from the
//! backend are routinely non-ASCII.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// ```
/// use zsfile::ui::helpers::truncate;
///
/// assert_eq!(truncate("résumé-final.pdf", 9), "résumé...");
/// assert_eq!(truncate("short", 9), "short");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Character width of `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Prints `text` padded with spaces to `target` characters.
pub fn print_padded(text: &str, target: usize) {
    print!("{text}{}", " ".repeat(target.saturating_sub(width(text))));
}

/// Prints `text` centered in `cols` characters, filling the whole line.
pub fn print_centered(text: &str, cols: usize) {
    let text = truncate(text, cols);
    let padding = cols.saturating_sub(width(&text)) / 2;
    print!("{}", " ".repeat(padding));
    print_padded(&text, cols - padding);
}

/// Prints text with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices, exclusive end, sorted and
/// non-overlapping. Selected rows print without highlights so the selection
/// colors stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > pos {
            print!("{}", chars[pos..start].iter().collect::<String>());
        }
        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        print!("{}", chars[start.max(pos)..end.max(start.max(pos))].iter().collect::<String>());
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));
        pos = end.max(pos);
    }

    if pos < chars.len() {
        print!("{}", chars[pos..].iter().collect::<String>());
    }
}
