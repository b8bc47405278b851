//! Input box and source selector.

use crate::ui::helpers::{position_cursor, print_padded, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{InputBarInfo, SourceSelectorInfo};

/// Horizontal margin for the input box (spaces on left and right).
const INPUT_BOX_MARGIN: usize = 3;

const CLEAR_HINT: &str = " Esc ✕ ";

/// Renders the 3-line input frame. Returns the next free row.
///
/// ```text
///    ┌──────────────────────────────────┐
///    │ Search: foo bar▏           Esc ✕ │
///    └──────────────────────────────────┘
/// ```
///
/// The frame uses `input_border` while focused and `border` otherwise.
/// When the value is empty the placeholder is printed dimmed.
pub fn render_input_bar(row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = if input.focused {
        &theme.colors.input_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}┌{}┐{}", Theme::fg(frame), "─".repeat(inner_width), Theme::reset());

    let prefix = format!(" {}: ", input.label);
    let hint_width = if input.show_clear { width(CLEAR_HINT) } else { 0 };
    let cursor = if input.focused { "▏" } else { "" };
    let value_width = inner_width.saturating_sub(width(&prefix) + hint_width + width(cursor));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}│", Theme::fg(frame));
    print!("{}{prefix}", Theme::fg(&theme.colors.text_normal));

    if input.value.is_empty() {
        print!("{cursor}{}", Theme::fg(&theme.colors.text_dim));
        print_padded(&truncate(&input.placeholder, value_width), value_width);
    } else {
        print_padded(&format!("{}{cursor}", tail(&input.value, value_width)), value_width + width(cursor));
    }

    if input.show_clear {
        print!("{}{CLEAR_HINT}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}│{}", Theme::fg(frame), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}└{}┘{}", Theme::fg(frame), "─".repeat(inner_width), Theme::reset());

    row + 3
}

/// The last `max` characters of `value`, so the cursor end stays visible.
fn tail(value: &str, max: usize) -> String {
    let count = width(value);
    value.chars().skip(count.saturating_sub(max)).collect()
}

/// Renders the provider radio group, e.g. `Source: (•) Sfile.co  ( ) Simfile.co`.
pub fn render_source_selector(row: usize, selector: &SourceSelectorInfo, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN + 1));
    print!("{}Source:{} ", Theme::fg(&theme.colors.text_dim), Theme::reset());

    for (label, selected) in &selector.options {
        if *selected {
            print!("{}{}(•) {label}{}  ", Theme::bold(), Theme::fg(&theme.colors.accent), Theme::reset());
        } else {
            print!("{}( ) {label}{}  ", Theme::fg(&theme.colors.text_dim), Theme::reset());
        }
    }
    print!("{}←/→{}", Theme::dim(), Theme::reset());
    row + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_keeps_the_end() {
        assert_eq!(tail("https://sfile.co/abc", 7), ".co/abc");
        assert_eq!(tail("abc", 10), "abc");
    }
}
