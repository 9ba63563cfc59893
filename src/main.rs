//! showshelf binary entrypoint kept minimal. The runtime lives in the library's `app`.

use std::fmt;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;

use showshelf::args::Args;
use showshelf::args::list::handle_list;
use showshelf::index::CategoryIndex;
use showshelf::{app, config, util};

struct ShowshelfTimer;

impl tracing_subscriber::fmt::time::FormatTime for ShowshelfTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        w.write_str(&util::log_timestamp())
    }
}

/// What: Build the log filter: `RUST_LOG` when set, otherwise the CLI directive.
fn env_filter(directive: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive))
}

/// What: Subscriber writing plain lines to `file` through a non-blocking worker.
///
/// Output:
/// - The subscriber and the worker guard; buffered lines are flushed when the guard drops.
fn file_subscriber(
    file: std::fs::File,
    directive: &str,
) -> (impl tracing::Subscriber + Send + Sync + 'static, WorkerGuard) {
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_timer(ShowshelfTimer)
        .finish();
    (subscriber, guard)
}

/// What: Initialize tracing to `<config>/logs/showshelf.log`, falling back to stderr.
///
/// Output:
/// - The file writer's guard; the caller keeps it alive until exit so pending lines flush.
///
/// Details:
/// - The TUI owns the terminal, so file logging is preferred; stderr is used only when
///   the log file cannot be opened.
fn init_logging(directive: &str) -> Option<WorkerGuard> {
    let mut log_path = config::logs_dir();
    log_path.push("showshelf.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (subscriber, guard) = file_subscriber(file, directive);
            subscriber.init();
            tracing::info!(path = %log_path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(directive))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(ShowshelfTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = init_logging(args.log_directive());

    let settings = args.resolve_settings();
    let params = match args.initial_params(&settings, CategoryIndex::standard()) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "invalid command-line parameters");
            eprintln!("showshelf: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::info!(
        url = %settings.source_url,
        page_size = settings.page_size,
        sort = settings.sort_key.as_config_key(),
        "showshelf starting"
    );

    if args.list {
        let state = app::initial_view_state(&settings, &params);
        let code = handle_list(state, &settings.source_config(), args.page).await;
        tracing::info!(code, "list mode finished");
        return ExitCode::from(code);
    }

    if let Err(err) = app::run(settings, params).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("showshelf: {err}");
        return ExitCode::FAILURE;
    }
    tracing::info!("showshelf exited");
    ExitCode::SUCCESS
}
