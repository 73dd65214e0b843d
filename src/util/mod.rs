//! Text helpers for drawing remote catalog strings in a terminal.
//!
//! - **Sanitizing**: strip control characters and ANSI escapes from service data
//! - **Measuring**: Unicode-aware display width and truncation
//!
//! ```
//! use catview::util::{display_width, strip_control_chars, truncate_to_width};
//!
//! let title = strip_control_chars("\x1b[1mGold Ring\x1b[0m");
//! assert_eq!(title, "Gold Ring");
//! assert_eq!(display_width("Hi 世界"), 7);
//! assert_eq!(truncate_to_width(&title, 7), "Gold...");
//! ```

mod text;

pub use text::{display_width, single_line, strip_control_chars, truncate_to_width};
