use std::{
    str::FromStr,
    sync::atomic::{AtomicBool, Ordering},
};

use tracing::Level;
use tracing_subscriber::{
    filter::Targets, fmt::format::FmtSpan, EnvFilter, Layer, Registry,
};

static IS_TRACING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Install a tracing subscriber according to the `TRACE` environment variable.
///
/// A bare level name (such as `debug`) enables that level for all `cpmconv`
/// targets. Anything else is treated as an `EnvFilter` directive string.
/// Does nothing when `TRACE` is unset or when a subscriber was already
/// installed by an earlier call.
pub fn enable_tracing_by_env() {
    let Ok(trace_var) = std::env::var("TRACE") else {
        return;
    };

    if IS_TRACING_ENABLED.swap(true, Ordering::SeqCst) {
        return;
    }

    use tracing_subscriber::{fmt, prelude::*};

    tracing_subscriber::registry()
        .with(filter_from_directives(&trace_var))
        .with(fmt::layer().pretty().with_span_events(FmtSpan::CLOSE))
        .init();
    tracing::trace!("enable_tracing_by_env");
}

fn filter_from_directives(trace_var: &str) -> Box<dyn Layer<Registry> + Send + Sync> {
    if let Ok(level) = Level::from_str(trace_var) {
        Targets::new().with_target("cpmconv", level).boxed()
    } else {
        EnvFilter::builder().with_regex(true).parse_lossy(trace_var).boxed()
    }
}
