//! Composable UI component renderers.
//!
//! Each component prints one region at a given row and returns the next free
//! row. [`render_layout`] stacks them:
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Tabs]
//! [blank line]
//! [Input box - 3 lines]
//! [Source selector | blank]
//! [Status line]
//! [Border]
//! [Results table | Empty state | Detail card]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod input;
mod pagination;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PanelBody, UIViewModel};

use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use header::{render_header, render_tabs};
use input::{render_input_bar, render_source_selector};
use pagination::render_pagination;
use status::render_status;
use table::render_results;

/// Renders a horizontal separator. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full frame for `vm`.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_tabs(current_row, &vm.tabs, theme, cols);
    current_row += 1;
    current_row = render_input_bar(current_row, &vm.input, theme, cols);
    current_row = match &vm.source_selector {
        Some(selector) => render_source_selector(current_row, selector, theme),
        None => current_row + 1,
    };
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    match &vm.body {
        PanelBody::Blank => {}
        PanelBody::Results(results) => {
            render_results(current_row, results, theme, cols);
            render_pagination(border_row.saturating_sub(1), &results.pagination, theme, cols);
        }
        PanelBody::Empty(empty) => {
            render_empty_state(current_row + 2, empty, theme, cols);
        }
        PanelBody::Detail(detail) => {
            render_detail(current_row + 1, detail, theme, cols);
        }
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
