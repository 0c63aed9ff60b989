use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Build a `tracing` dispatcher configured for:
/// - JSON logs to stdout
/// - EnvFilter that respects `RUST_LOG` (takes precedence) and falls back to `default_level`
///
/// The caller installs it with `tracing::dispatcher::set_global_default`.
pub fn build_dispatch(default_level: &str) -> tracing::Dispatch {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .json();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    tracing::Dispatch::new(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_accepts_events() {
        let dispatch = build_dispatch("info");
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(answer = 42, "dispatch smoke test");
        });
    }
}
