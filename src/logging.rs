use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `level` accepts anything `EnvFilter` understands (`INFO`, `debug`,
/// `textsummarize=trace,tower_http=info`, ...). An unparsable level falls back
/// to `info`. JSON output is used when `json` is set, a compact human-readable
/// format otherwise. Output goes to stderr so the CLI keeps stdout for the
/// summary. Calling this more than once is a no-op.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_new(level.to_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr);
        tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
    };

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
