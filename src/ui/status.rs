use crate::app::{App, Mode};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

const SPINNER: [char; super::loop_runner::SPINNER_FRAMES] =
    ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.is_loading() {
        Cow::Owned(format!(
            "{} Loading catalog from {}...",
            SPINNER[app.spinner_frame % SPINNER.len()],
            app.client.base_url()
        ))
    } else if app.edit_form.is_some() {
        Cow::Borrowed("Type to edit | Tab/Shift+Tab field | ENTER submit | ESC cancel")
    } else if app.store.selected_product().is_some() {
        Cow::Borrowed("[u]pdate [d]elete | ESC close")
    } else {
        match app.mode {
            Mode::Search => Cow::Borrowed("Type to search | ESC clear | ENTER keep"),
            Mode::Dropdown { .. } => Cow::Borrowed("j/k move | ENTER apply | ESC cancel"),
            Mode::Browse => Cow::Borrowed(
                "[/]search [c]ategory [v]iew [u]pdate [d]elete [r]eload [T]heme [?]help [q]uit",
            ),
        }
    };

    f.render_widget(
        Paragraph::new(text).style(app.style("status_bar")),
        area,
    );
}
