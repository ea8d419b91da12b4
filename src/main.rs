//! updown - guess whether a stock closes higher or lower tomorrow.
//!
//! The TUI owns the terminal, so logs go to a daily rolling file in the
//! application data directory.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use updown::{App, Config, Result};

fn init_logging() -> Option<WorkerGuard> {
    let file_layer = updown::config::log_dir()
        .and_then(|dir| {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .map(|dir| {
            let appender = tracing_appender::rolling::daily(dir, "updown.log");
            tracing_appender::non_blocking(appender)
        })
        .ok();

    let (layer, guard) = match file_layer {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "updown=info".into()),
        )
        .with(layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Flushes the log file on exit
    let _guard = init_logging();

    // Load configuration
    let config = Config::load_or_default()?;

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
