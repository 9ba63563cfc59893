//! Settings file handling: location, parsing, and the resolved [`Settings`].

mod parsing;
mod paths;
mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::{Settings, load_settings_from, parse_settings, settings};
