//! Resolved file card.
//!
//! ```text
//!   report.pdf
//!   Size       1.2 MB
//!   Type       application/pdf
//!   Source     https://sfile.co/abc123        [c] Copy
//!
//!   [d] Download File          [b] Back to results
//!   resolved just now
//! ```

use crate::ui::helpers::{position_cursor, print_padded, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 11;
const INDENT: &str = "  ";

pub fn render_detail(row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) -> usize {
    let content_width = cols.saturating_sub(width(INDENT));
    let mut current_row = row;

    position_cursor(current_row, 1);
    print!("{INDENT}{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print_padded(&truncate(&detail.title, content_width), content_width);
    print!("{}", Theme::reset());
    current_row += 1;

    for (label, value) in &detail.specs {
        position_cursor(current_row, 1);
        print!("{INDENT}{}", Theme::fg(&theme.colors.text_dim));
        print_padded(label, LABEL_WIDTH);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print_padded(&truncate(value, content_width.saturating_sub(LABEL_WIDTH)), content_width.saturating_sub(LABEL_WIDTH));
        print!("{}", Theme::reset());
        current_row += 1;
    }

    let copy = format!("  [c] {}", detail.copy_label);
    let copy_color = if detail.copy_label == "Copy" {
        &theme.colors.accent
    } else {
        &theme.colors.success_fg
    };
    let url_width = content_width.saturating_sub(LABEL_WIDTH + width(&copy));

    position_cursor(current_row, 1);
    print!("{INDENT}{}", Theme::fg(&theme.colors.text_dim));
    print_padded("Source", LABEL_WIDTH);
    print!("{}{}", Theme::underline(), Theme::fg(&theme.colors.link_fg));
    print!("{}{}", truncate(&detail.source_url, url_width), Theme::reset());
    print!("{}{copy}{}", Theme::fg(copy_color), Theme::reset());
    current_row += 2;

    position_cursor(current_row, 1);
    print!("{INDENT}{}{}", Theme::bold(), Theme::fg(&theme.colors.accent));
    print!("[d] {}", detail.download_label);
    print!("{}", Theme::reset());
    if detail.can_go_back {
        print!("        {}[b] Back to results{}", Theme::fg(&theme.colors.text_normal), Theme::reset());
    }
    current_row += 1;

    position_cursor(current_row, 1);
    print!("{INDENT}{}{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), detail.resolved_age);
    print!("{}", Theme::reset());
    current_row + 1
}
