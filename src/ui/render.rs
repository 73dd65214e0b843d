//! Render functions for the TUI.
//!
//! Draws the header, product table and status bar, then any overlays in
//! stacking order: detail, update form, dropdown, help, warning.

use crate::app::{App, Mode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{help, modal, status, table};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

const HEADER_TITLE: &str = " Product Table ";

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    table::render(f, app, chunks[1]);
    status::render(f, app, chunks[2]);

    if let Some(product) = app.store.selected_product() {
        modal::render_detail(f, app, product);
    }
    if let Some(form) = &app.edit_form {
        modal::render_edit_form(f, app, form);
    }
    if let Mode::Dropdown { selected } = app.mode {
        modal::render_dropdown(f, app, selected, chunks[1]);
    }
    if app.show_help {
        help::render(f, app);
    }
    if let Some(warning) = &app.warning {
        modal::render_warning(f, app, warning);
    }
}

/// Header: search box on the left, category selector on the right.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let searching = app.mode == Mode::Search;
    let term = app.store.search_term();

    let search_text = if searching {
        format!("Search: {}_", term)
    } else if term.is_empty() {
        "Search: (press /)".to_string()
    } else {
        format!("Search: {}", term)
    };
    let search_style = if searching {
        app.style("search_input_active")
    } else {
        app.style("search_input")
    };

    let filter = app.store.category_filter();
    let category_text = if filter.is_empty() {
        "[c] All Categories".to_string()
    } else {
        format!("[c] Category: {}", filter)
    };

    let line = Line::from(vec![
        Span::styled(search_text, search_style),
        Span::raw("   "),
        Span::styled(category_text, app.style("dropdown_label")),
    ]);

    let border_role = if searching {
        "panel_border_focused"
    } else {
        "panel_border"
    };
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style(border_role))
            .title(Span::styled(HEADER_TITLE, app.style("header_title"))),
    );
    f.render_widget(header, area);
}
