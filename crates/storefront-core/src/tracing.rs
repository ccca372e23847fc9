use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directives when `RUST_LOG` is unset: service logs at `info`, SQL
/// statement logging from sqlx kept at `warn`.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

/// Initialize structured stdout tracing. Call once at service startup.
///
/// Every line is a JSON object. Events emitted inside the HTTP trace span carry
/// that span's fields (method, uri) under `span`. Later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .try_init();
}
