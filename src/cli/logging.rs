//! Logging setup
//!
//! `RUST_LOG` filters (default `info`). Output goes to stderr through a
//! non-blocking writer so stdout stays clean for JSON results.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Keep the returned guard alive until exit or buffered lines are lost.
/// A second call leaves the first subscriber in place.
pub fn init_logging(json: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("Logging already initialized: {}", e);
    }

    guard
}
