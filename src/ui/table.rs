use crate::app::App;
use crate::catalog::format_price;
use crate::util::{single_line, truncate_to_width};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const COLUMN_SPACING: u16 = 1;

fn column_widths() -> [Constraint; 5] {
    [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Length(9),
        Constraint::Min(10),
        Constraint::Length(16),
    ]
}

/// Render the product table (the visible subset only).
///
/// Also records how many rows fit so PageUp/PageDown move by a screenful.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let products = app.store.filtered_products();
    let total = app.store.products().len();

    let title = if products.len() == total {
        format!(" Products ({}) ", total)
    } else {
        format!(" Products ({} of {}) ", products.len(), total)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(title);

    let inner = block.inner(area);
    // header row plus its bottom margin
    let page_size = inner.height.saturating_sub(2).max(1) as usize;

    if products.is_empty() {
        let text = if app.products_loading {
            "Loading products..."
        } else {
            "No products"
        };
        f.render_widget(
            Paragraph::new(text).style(app.style("row_normal")).block(block),
            area,
        );
        app.page_size = page_size;
        return;
    }

    let columns = Layout::horizontal(column_widths())
        .spacing(COLUMN_SPACING)
        .split(inner);
    let title_width = columns[1].width as usize;
    let description_width = columns[3].width as usize;
    let category_width = columns[4].width as usize;

    let rows: Vec<Row> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if i % 2 == 1 {
                app.style("row_striped")
            } else {
                app.style("row_normal")
            };
            Row::new(vec![
                Cell::from(product.id.to_string()),
                Cell::from(
                    truncate_to_width(&single_line(&product.title), title_width).into_owned(),
                ),
                Cell::from(format_price(product.price)).style(app.style("price")),
                Cell::from(
                    truncate_to_width(&single_line(&product.description), description_width)
                        .into_owned(),
                ),
                Cell::from(truncate_to_width(&product.category, category_width).into_owned()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Id", "Title", "Price", "Description", "Category"])
        .style(app.style("table_header"))
        .bottom_margin(1);

    let table = Table::new(rows, column_widths())
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(app.style("row_selected"))
        .block(block);

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
    app.page_size = page_size;
}
