use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "BUILDPLAN_LOG";

/// Filter used when neither [`LOG_ENV`] nor `RUST_LOG` is set: resolution
/// summaries and lint warnings from this workspace, warnings from everything else.
pub const DEFAULT_DIRECTIVES: &str = "warn,buildplan_core=info";

fn env_filter() -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))
}

/// Install a global tracing subscriber for plan resolution.
///
/// Lints are emitted at `warn` with their field path, per-layer loading and
/// plan fingerprints at `debug`. Fails if a global subscriber is already
/// installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
