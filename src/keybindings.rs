//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are looked up per `Context`; every context except the text-entry
//! ones falls back to `Global`. Users can rebind actions from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    Back,
    Select,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    OpenCategories,
    ViewProduct,
    UpdateProduct,
    DeleteProduct,
    NextField,
    PrevField,
    SubmitForm,
    Reload,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::Back => "Close / clear filters",
            Self::Select => "Select",
            Self::EnterSearch => "Search by title",
            Self::ExitSearch => "Clear search",
            Self::CommitSearch => "Keep search",
            Self::OpenCategories => "Choose category",
            Self::ViewProduct => "View product",
            Self::UpdateProduct => "Update product (local)",
            Self::DeleteProduct => "Delete product (local)",
            Self::NextField => "Next field",
            Self::PrevField => "Previous field",
            Self::SubmitForm => "Submit update",
            Self::Reload => "Reload catalog",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// Product table (the default view).
    Global,
    Search,
    Dropdown,
    Detail,
    EditForm,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report `Shift` alongside upper-case characters and BackTab;
    /// the case of the character already carries that information.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) | KeyCode::BackTab => {
                Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT))
            }
            _ => self,
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "PageUp", "Delete"
/// - Modifier combos: "Ctrl+d", "Ctrl+s"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backtab" | "shift+tab" => Some(KeyCode::BackTab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "delete" | "del" => Some(KeyCode::Delete),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return (1..=12)
            .contains(&n)
            .then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts
/// (e.g. `Enter` views a row in the table but submits the update form).
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn bind_all(&mut self, context: Context, keys: &[KeySpec], action: Action) {
        for key in keys {
            self.bind(context, *key, action);
        }
    }

    fn register_defaults(&mut self) {
        use KeyCode::*;
        let key = KeySpec::plain;

        // === Product table ===
        self.bind(Context::Global, key(Char('q')), Action::Quit);
        self.bind_all(Context::Global, &[key(Char('j')), key(Down)], Action::NavDown);
        self.bind_all(Context::Global, &[key(Char('k')), key(Up)], Action::NavUp);
        self.bind_all(
            Context::Global,
            &[key(PageDown), KeySpec::ctrl('d')],
            Action::PageDown,
        );
        self.bind_all(
            Context::Global,
            &[key(PageUp), KeySpec::ctrl('u')],
            Action::PageUp,
        );
        self.bind(Context::Global, key(Esc), Action::Back);
        self.bind(Context::Global, key(Char('/')), Action::EnterSearch);
        self.bind(Context::Global, key(Char('c')), Action::OpenCategories);
        self.bind_all(
            Context::Global,
            &[key(Char('v')), key(Enter)],
            Action::ViewProduct,
        );
        self.bind(Context::Global, key(Char('u')), Action::UpdateProduct);
        self.bind_all(
            Context::Global,
            &[key(Char('d')), key(Delete)],
            Action::DeleteProduct,
        );
        self.bind(Context::Global, key(Char('r')), Action::Reload);
        self.bind(Context::Global, key(Char('T')), Action::CycleTheme);
        self.bind(Context::Global, key(Char('?')), Action::ShowHelp);

        // === Search input ===
        self.bind(Context::Search, key(Esc), Action::ExitSearch);
        self.bind(Context::Search, key(Enter), Action::CommitSearch);

        // === Category dropdown ===
        self.bind(Context::Dropdown, key(Enter), Action::Select);
        self.bind(Context::Dropdown, key(Esc), Action::Back);

        // === Detail modal ===
        self.bind_all(
            Context::Detail,
            &[key(Esc), key(Enter), key(Char('q'))],
            Action::Back,
        );

        // === Update form ===
        self.bind(Context::EditForm, key(Enter), Action::SubmitForm);
        self.bind(Context::EditForm, KeySpec::ctrl('s'), Action::SubmitForm);
        self.bind(Context::EditForm, key(Esc), Action::Back);
        self.bind_all(Context::EditForm, &[key(Tab), key(Down)], Action::NextField);
        self.bind_all(Context::EditForm, &[key(BackTab), key(Up)], Action::PrevField);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Look up the action for a key in `context`, falling back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            return self.lookup.get(&(Context::Global, key)).copied();
        }

        None
    }

    /// Look up the action bound in exactly `context`, without Global fallback.
    ///
    /// Text-entry contexts use this so that printable keys reach the input.
    pub fn context_action(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();
        self.lookup.get(&(context, key)).copied()
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "back" => Some(Action::Back),
        "select" => Some(Action::Select),
        "enter_search" | "entersearch" | "search" => Some(Action::EnterSearch),
        "exit_search" | "exitsearch" => Some(Action::ExitSearch),
        "commit_search" | "commitsearch" => Some(Action::CommitSearch),
        "open_categories" | "opencategories" | "categories" => Some(Action::OpenCategories),
        "view_product" | "viewproduct" | "view" => Some(Action::ViewProduct),
        "update_product" | "updateproduct" | "update" | "edit" => Some(Action::UpdateProduct),
        "delete_product" | "deleteproduct" | "delete" => Some(Action::DeleteProduct),
        "next_field" | "nextfield" => Some(Action::NextField),
        "prev_field" | "prevfield" => Some(Action::PrevField),
        "submit_form" | "submitform" | "submit" => Some(Action::SubmitForm),
        "reload" | "refresh" => Some(Action::Reload),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
