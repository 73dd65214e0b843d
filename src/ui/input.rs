//! Input handling for the TUI.
//!
//! Keys go to the topmost layer: warning, help, update form, detail view,
//! dropdown, search box, then the product table.

use crate::app::{App, AppEvent, Mode};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if app.warning.is_some() {
        handle_warning_input(app, code);
        return Action::Continue;
    }

    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.is_editing() {
        handle_edit_form_input(app, code, modifiers);
        return Action::Continue;
    }

    if app.store.selected_product().is_some() {
        return handle_detail_input(app, code, modifiers);
    }

    match app.mode {
        Mode::Dropdown { .. } => handle_dropdown_input(app, code, modifiers),
        Mode::Search => {
            handle_search_input(app, code, modifiers);
            Action::Continue
        }
        Mode::Browse => handle_browse_input(app, code, modifiers, event_tx),
    }
}

/// The warning overlay blocks everything until acknowledged.
fn handle_warning_input(app: &mut App, code: KeyCode) {
    if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dismiss_warning();
    }
}

/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Text entry in the update form; only form bindings are live so that every
/// printable key reaches the focused input.
fn handle_edit_form_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .context_action(code, modifiers, KbContext::EditForm)
    {
        Some(KbAction::SubmitForm) => app.submit_edit_form(),
        Some(KbAction::Back) => app.cancel_edit(),
        Some(KbAction::NextField) => app.focus_next_field(),
        Some(KbAction::PrevField) => app.focus_prev_field(),
        _ => match code {
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_form_char(c)
            }
            KeyCode::Backspace => app.pop_form_char(),
            _ => {}
        },
    }
}

fn handle_detail_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Detail)
    {
        Some(KbAction::Back) => app.close_view(),
        Some(KbAction::UpdateProduct) => app.edit_current(),
        Some(KbAction::DeleteProduct) => app.delete_current(),
        Some(KbAction::ShowHelp) => app.show_help = true,
        Some(KbAction::Quit) => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

fn handle_dropdown_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Dropdown)
    {
        Some(KbAction::Select) => app.choose_dropdown(),
        Some(KbAction::Back) => app.mode = Mode::Browse,
        Some(KbAction::NavDown) => app.move_dropdown(true),
        Some(KbAction::NavUp) => app.move_dropdown(false),
        Some(KbAction::Quit) => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

/// Live search: each keystroke refilters the table.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match app
        .keybindings
        .context_action(code, modifiers, KbContext::Search)
    {
        Some(KbAction::CommitSearch) => app.exit_search(true),
        Some(KbAction::ExitSearch) => app.exit_search(false),
        _ => match code {
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_search_char(c)
            }
            KeyCode::Backspace => app.pop_search_char(),
            _ => {}
        },
    }
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Global)
    else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::NavDown => app.nav_down(1),
        KbAction::NavUp => app.nav_up(1),
        KbAction::PageDown => app.nav_down(app.page_size.max(1)),
        KbAction::PageUp => app.nav_up(app.page_size.max(1)),
        KbAction::Back => {
            if !app.store.search_term().is_empty() || !app.store.category_filter().is_empty() {
                app.clear_filters();
                app.set_status("Filters cleared");
            }
        }
        KbAction::EnterSearch => app.enter_search(),
        KbAction::OpenCategories => app.open_dropdown(),
        KbAction::ViewProduct | KbAction::Select => app.view_selected(),
        KbAction::UpdateProduct => app.edit_current(),
        KbAction::DeleteProduct => app.delete_current(),
        KbAction::Reload => {
            app.reload(event_tx);
            app.set_status("Reloading catalog...");
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => app.show_help = true,
        KbAction::ExitSearch
        | KbAction::CommitSearch
        | KbAction::NextField
        | KbAction::PrevField
        | KbAction::SubmitForm => {}
    }
    Action::Continue
}
