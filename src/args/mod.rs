//! Command-line argument definition and processing.

pub mod list;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Settings, load_settings_from};
use crate::error::ViewError;
use crate::index::CategoryIndex;
use crate::state::{SortKey, ViewParameters};

/// showshelf - A fast, friendly TUI for browsing a remote catalog of shows
#[derive(Parser, Debug)]
#[command(name = "showshelf")]
#[command(version)]
#[command(about = "A fast, friendly TUI for browsing a remote catalog of shows", long_about = None)]
pub struct Args {
    /// Catalog endpoint returning a JSON array of shows
    #[arg(long)]
    pub url: Option<String>,

    /// Shows per page
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub page_size: Option<u16>,

    /// Initial sort key (newest, oldest, title_asc, title_desc)
    #[arg(short, long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Initial search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Initial category, by id or name (e.g. 4 or "Comedy")
    #[arg(short, long)]
    pub category: Option<String>,

    /// Page to show with --list
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Print one page to stdout and exit instead of starting the TUI
    #[arg(short, long)]
    pub list: bool,

    /// Read settings from this file instead of ~/.config/showshelf/settings.conf
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What: `clap` value parser for sort keys.
fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

impl Args {
    /// What: Effective log filter directive.
    #[must_use]
    pub fn log_directive(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }

    /// What: Settings from the configured file, with CLI overrides applied.
    ///
    /// Details:
    /// - `--config` replaces the default settings lookup.
    /// - `--url`, `--page-size` and `--sort` win over file values.
    #[must_use]
    pub fn resolve_settings(&self) -> Settings {
        let mut settings = self
            .config
            .as_deref()
            .map_or_else(crate::config::settings, load_settings_from);
        if let Some(url) = &self.url {
            settings.source_url.clone_from(url);
        }
        if let Some(size) = self.page_size {
            settings.page_size = usize::from(size);
        }
        if let Some(key) = self.sort {
            settings.sort_key = key;
        }
        settings
    }

    /// What: Starting view parameters for this invocation.
    ///
    /// # Errors
    /// - `InvalidParameter` when `--category` is neither a numeric id nor a known name.
    pub fn initial_params(
        &self,
        settings: &Settings,
        index: &CategoryIndex,
    ) -> Result<ViewParameters, ViewError> {
        let category = match self.category.as_deref() {
            None => None,
            Some(raw) => index.resolve_choice(raw)?,
        };
        Ok(ViewParameters {
            query: self.query.clone().unwrap_or_default(),
            category,
            sort_key: settings.sort_key,
            page_index: 1,
        })
    }
}
