//! Tracing setup for the command line.
//!
//! Diagnostics are the program's output and go to stdout; log events go to
//! stderr through a non-blocking writer so the two never interleave.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

/// Initialize the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. The returned `WorkerGuard`
/// must be kept alive until exit so buffered events are flushed.
pub fn init_tracing(default_level: &str) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_filter(env_filter);

    Registry::default().with(stderr_layer).init();

    guard
}
