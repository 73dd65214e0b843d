//! Overlays drawn above the product table: detail view, update form,
//! category dropdown and the blocking warning.

use crate::app::{App, EditForm};
use crate::catalog::{format_price, Product, ProductField};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Centered box of `width` x `height`, clamped to `area`.
fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Width of `s` in columns as a `u16`, saturating on overlong text.
fn width_u16(s: &str) -> u16 {
    u16::try_from(display_width(s)).unwrap_or(u16::MAX)
}

/// Rows `lines` take when wrapped at `width` columns.
fn wrapped_rows(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|l| l.width().max(1).div_ceil(width)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Draw a bordered modal with `body` above a footer pinned to the last inner
/// row. The footer stays visible however much the body is clipped.
fn render_modal(
    f: &mut Frame,
    app: &App,
    overlay: Rect,
    title: &str,
    body: Paragraph,
    footer: Line,
) {
    f.render_widget(Clear, overlay);
    let block = modal_block(app, title);
    let inner = block.inner(overlay);
    f.render_widget(block, overlay);

    let [body_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    f.render_widget(body, body_area);
    f.render_widget(Paragraph::new(footer), footer_area);
}

fn modal_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(title)
}

fn labelled<'a>(app: &App, label: &'static str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), app.style("modal_label")),
        Span::styled(value, app.style("modal_body")),
    ])
}

// ============================================================================
// Detail
// ============================================================================

const DETAIL_WIDTH: u16 = 70;

/// Read-only view of one product, sized to its content.
pub(super) fn render_detail(f: &mut Frame, app: &App, product: &Product) {
    let area = f.area();
    let width = DETAIL_WIDTH.min(area.width);

    let mut lines = vec![
        labelled(app, "Id:", product.id.to_string()),
        labelled(app, "Title:", product.title.clone()),
        labelled(app, "Price:", format_price(product.price)),
        labelled(app, "Category:", product.category.clone()),
    ];
    if let Some(rating) = product.rating {
        lines.push(labelled(
            app,
            "Rating:",
            format!("{} ({} reviews)", rating.rate, rating.count),
        ));
    }
    if let Some(image) = &product.image {
        lines.push(labelled(app, "Image:", image.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Description:", app.style("modal_label"))));
    lines.push(Line::from(Span::styled(
        product.description.clone(),
        app.style("modal_body"),
    )));

    // body, blank spacer, footer, borders
    let height = wrapped_rows(&lines, width.saturating_sub(2)).saturating_add(4);
    let overlay = centered_box(area, width, height);
    if overlay.width < 10 || overlay.height < 3 {
        return;
    }

    let footer = Line::from(Span::styled(
        "(u) Update  (d) Delete  (Esc) Close",
        app.style("form_field"),
    ));
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    render_modal(f, app, overlay, " Product Details ", body, footer);
}

// ============================================================================
// Update form
// ============================================================================

const FORM_WIDTH: u16 = 70;

/// One input per editable attribute; the focused input shows a cursor.
pub(super) fn render_edit_form(f: &mut Frame, app: &App, form: &EditForm) {
    let area = f.area();
    let width = FORM_WIDTH.min(area.width);
    let value_width = usize::from(width).saturating_sub(2 + 13 + 1);

    let mut lines = Vec::with_capacity(ProductField::ALL.len() + 1);
    for field in ProductField::ALL {
        let focused = field == form.focused;
        let input = form.input(field);
        let shown = if focused {
            // keep the end of the input (and the cursor) in view
            tail_to_width(input, value_width.saturating_sub(1)) + "_"
        } else {
            truncate_to_width(input, value_width).into_owned()
        };
        let (marker, style) = if focused {
            ("> ", app.style("form_field_focused"))
        } else {
            ("  ", app.style("form_field"))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<11}", marker, field.label()), app.style("modal_label")),
            Span::styled(shown, style),
        ]));

        if let (Some(error), ProductField::Price) = (&form.field_error, field) {
            lines.push(Line::from(Span::styled(
                format!("{:13}{}", "", error),
                app.style("form_error"),
            )));
        }
    }

    // body, blank spacer, footer, borders
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let overlay = centered_box(area, width, height);
    if overlay.width < 10 || overlay.height < 3 {
        return;
    }

    let title = match app.store.editing_product() {
        Some(p) => format!(" Update Product #{} ", p.id),
        None => " Update Product ".to_string(),
    };
    let footer = Line::from(Span::styled(
        "(Enter) Submit  (Tab) Next field  (Esc) Cancel",
        app.style("form_field"),
    ));
    render_modal(f, app, overlay, &title, Paragraph::new(lines), footer);
}

/// The longest suffix of `s` that fits in `width` columns.
fn tail_to_width(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = display_width(c.encode_utf8(&mut [0; 4]));
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    s[start..].to_string()
}

// ============================================================================
// Category dropdown
// ============================================================================

/// Dropdown anchored to the top-right of the table area.
pub(super) fn render_dropdown(f: &mut Frame, app: &App, selected: usize, anchor: Rect) {
    let options = app.dropdown_options();
    let longest = options
        .iter()
        .map(|o| width_u16(&o.label))
        .max()
        .unwrap_or(0);

    let width = longest
        .saturating_add(6)
        .max(24)
        .min(anchor.width.saturating_sub(2));
    let height = u16::try_from(options.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(anchor.height);
    let overlay = Rect::new(
        anchor.x + anchor.width.saturating_sub(width.saturating_add(1)),
        anchor.y,
        width,
        height,
    );
    if overlay.width < 10 || overlay.height < 3 {
        return;
    }
    f.render_widget(Clear, overlay);

    let visible = overlay.height.saturating_sub(2) as usize;
    let skip = selected.saturating_sub(visible.saturating_sub(1));
    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(i, option)| {
            if i == selected {
                Line::from(Span::styled(
                    format!("> {}", option.label),
                    app.style("row_selected"),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", option.label),
                    app.style("modal_body"),
                ))
            }
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(modal_block(app, " Category ")),
        overlay,
    );
}

// ============================================================================
// Warning
// ============================================================================

/// Blocking warning, dismissed with Enter.
pub(super) fn render_warning(f: &mut Frame, app: &App, message: &str) {
    let width = width_u16(message).saturating_add(4).clamp(30, 60);
    let overlay = centered_box(f.area(), width, 7);
    if overlay.width < 10 || overlay.height < 3 {
        return;
    }

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), app.style("warning"))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    let footer = Line::from(Span::styled("(Enter) OK", app.style("form_field")))
        .alignment(Alignment::Center);
    render_modal(f, app, overlay, " Warning ", body, footer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail_to_width() {
        assert_eq!(tail_to_width("hello", 10), "hello");
        assert_eq!(tail_to_width("hello world", 5), "world");
        assert_eq!(tail_to_width("价格价格", 5), "价格");
        assert_eq!(tail_to_width("abc", 0), "");
    }

    #[test]
    fn test_centered_box_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let b = centered_box(area, 200, 100);
        assert_eq!(b, area);

        let b = centered_box(area, 40, 5);
        assert_eq!(b, Rect::new(20, 9, 40, 5));
    }

    #[test]
    fn test_wrapped_rows() {
        let lines = vec![Line::from("abcdefghij"), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_rows(&lines, 4), 3 + 1 + 1);
        assert_eq!(wrapped_rows(&lines, 0), 10 + 1 + 3);
    }

    #[test]
    fn test_width_u16_saturates() {
        assert_eq!(width_u16("abc"), 3);
        assert_eq!(width_u16(&"x".repeat(70_000)), u16::MAX);
    }
}
