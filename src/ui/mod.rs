//! Terminal User Interface module.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input routing per overlay/mode
//! - `events` - Fetch result processing
//! - `render` - Frame layout and overlay stacking
//! - `table` - Product table widget
//! - `modal` - Detail, update form, dropdown and warning overlays
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

mod events;
mod help;
mod input;
mod loop_runner;
mod modal;
mod render;
mod status;
mod table;

pub use loop_runner::{run, Action};
