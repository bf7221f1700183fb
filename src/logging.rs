use crate::timer::ConverterTimer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the process-wide subscriber: env filter, stderr output, UTC timestamps.
///
/// `UTCLOG_LOG` wins over `RUST_LOG`; with neither set only `utclog=info` passes.
pub fn init() {
    let filter = EnvFilter::try_from_env("UTCLOG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| "utclog=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(ConverterTimer::utc()),
        )
        .init();
}
