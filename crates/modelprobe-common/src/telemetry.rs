use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for a command-line process.
///
/// - `default_directive`: filter used when `RUST_LOG` is unset (e.g. "warn").
///
/// Log lines go to stderr so they never interleave with the report on stdout.
/// Calling this twice is harmless; the second subscriber is ignored.
pub fn init_tracing(default_directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("tracing already initialized: {err}");
    }
}
