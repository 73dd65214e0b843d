//! Terminal product catalog browser.
//!
//! Fetches a catalog from a fakestoreapi-compatible service, shows it as a
//! searchable, filterable table, and lets the user view, update and delete
//! products. Updates and deletions are local to the running process.

pub mod app;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod keybindings;
pub mod store;
pub mod theme;
pub mod ui;
pub mod util;
