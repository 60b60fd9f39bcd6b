//! Telemetry helpers for applications embedding `chart-axis`.
//!
//! The crate only emits `tracing` events (axis change, chart-rect layout,
//! scale picking). Installing a subscriber is left to the host; the helpers
//! here are a convenience for demos and tests.

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_TRACING_DIRECTIVES: &str = "chart_axis=info";

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directives(DEFAULT_TRACING_DIRECTIVES)
}

/// Same as [`init_default_tracing`] with explicit fallback filter directives,
/// e.g. `"chart_axis=trace"` to see every scale pick.
///
/// `RUST_LOG` still wins when it is set.
#[must_use]
pub fn init_tracing_with_directives(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_TRACING_DIRECTIVES, init_tracing_with_directives};

    #[test]
    fn default_directives_target_this_crate() {
        assert!(DEFAULT_TRACING_DIRECTIVES.starts_with("chart_axis"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn init_is_a_no_op_without_feature() {
        assert!(!init_tracing_with_directives("chart_axis=trace"));
    }
}
