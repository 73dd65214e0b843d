//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub header_title: Style,
    pub search_input: Style,
    pub search_input_active: Style,
    pub dropdown_label: Style,

    // -- Product table --
    pub table_header: Style,
    pub row_normal: Style,
    pub row_striped: Style,
    pub row_selected: Style,
    pub price: Style,

    // -- Modals --
    pub modal_body: Style,
    pub modal_label: Style,
    pub form_field: Style,
    pub form_field_focused: Style,
    pub form_error: Style,
    pub warning: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            search_input: Style::default(),
            search_input_active: Style::default().fg(Color::Yellow),
            dropdown_label: Style::default().fg(Color::Cyan),

            table_header: Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
            row_normal: Style::default(),
            row_striped: Style::default().bg(Color::Rgb(30, 30, 30)),
            row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            price: Style::default().fg(Color::Green),

            modal_body: Style::default(),
            modal_label: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            form_field: Style::default().fg(Color::Gray),
            form_field_focused: Style::default().fg(Color::Yellow),
            form_error: Style::default().fg(Color::Red),
            warning: Style::default().fg(Color::Yellow),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    fn light() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            search_input: Style::default().fg(Color::Black),
            search_input_active: Style::default().fg(Color::Magenta),
            dropdown_label: Style::default().fg(Color::Blue),

            table_header: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
            row_normal: Style::default().fg(Color::Black),
            row_striped: Style::default().fg(Color::Black).bg(Color::Rgb(235, 235, 235)),
            row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            price: Style::default().fg(Color::Rgb(0, 110, 0)),

            modal_body: Style::default().fg(Color::Black),
            modal_label: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            form_field: Style::default().fg(Color::DarkGray),
            form_field_focused: Style::default().fg(Color::Magenta),
            form_error: Style::default().fg(Color::Red),
            warning: Style::default().fg(Color::Magenta),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`, so renderers can
/// resolve a role name (e.g. `"row_selected"`) at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 18] = [
    "header_title",
    "search_input",
    "search_input_active",
    "dropdown_label",
    "table_header",
    "row_normal",
    "row_striped",
    "row_selected",
    "price",
    "modal_body",
    "modal_label",
    "form_field",
    "form_field_focused",
    "form_error",
    "warning",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 18] = [
            p.header_title,
            p.search_input,
            p.search_input_active,
            p.dropdown_label,
            p.table_header,
            p.row_normal,
            p.row_striped,
            p.row_selected,
            p.price,
            p.modal_body,
            p.modal_label,
            p.form_field,
            p.form_field_focused,
            p.form_error,
            p.warning,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
