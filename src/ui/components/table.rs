//! Results table: summary line, column headers and rows.
//!
//! NAME is flexible, TYPE/SIZE/DATE/DOWNLOADS are fixed. The name column
//! width is whatever [`META_COLUMNS_WIDTH`] leaves, computed once in the view
//! model so truncation and highlight ranges agree.

use crate::app::view::META_COLUMNS_WIDTH;
use crate::ui::helpers::{self, position_cursor, print_padded, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ResultsInfo};

const TYPE_WIDTH: usize = 6;
const SIZE_WIDTH: usize = 11;
const DATE_WIDTH: usize = 14;
const DOWNLOADS_WIDTH: usize = 11;

fn name_width(cols: usize) -> usize {
    cols.saturating_sub(META_COLUMNS_WIDTH).max(12)
}

/// Renders summary, headers and rows. Returns the next free row.
pub fn render_results(row: usize, results: &ResultsInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(&helpers::truncate(&format!("  {}", results.summary), cols), cols);
    print!("{}", Theme::reset());

    let mut current_row = render_table_headers(row + 1, theme, cols);
    for item in &results.items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("  ");
    print_padded("NAME", name_width(cols));
    print_padded("TYPE", TYPE_WIDTH);
    print_padded("SIZE", SIZE_WIDTH);
    print_padded("DATE", DATE_WIDTH);
    print_padded("DOWNLOADS", DOWNLOADS_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Selection colors take precedence over match highlights.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
        print!("▸ ");
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  ");
    }

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(name_width(cols).saturating_sub(width(&item.name))));

    print_padded(&helpers::truncate(&item.kind, TYPE_WIDTH - 1), TYPE_WIDTH);
    print_padded(&helpers::truncate(&item.size, SIZE_WIDTH - 1), SIZE_WIDTH);
    print_padded(&helpers::truncate(&item.date, DATE_WIDTH - 1), DATE_WIDTH);
    print_padded(&helpers::truncate(&item.downloads, DOWNLOADS_WIDTH - 1), DOWNLOADS_WIDTH);

    let line_len = 2 + name_width(cols) + TYPE_WIDTH + SIZE_WIDTH + DATE_WIDTH + DOWNLOADS_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}
