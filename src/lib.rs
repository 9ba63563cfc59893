//! Library entry for showshelf: the derived-view engine, record source and terminal UI.

pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod events;
pub mod index;
pub mod logic;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_utils;
