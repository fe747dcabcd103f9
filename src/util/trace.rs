//! Installs a `tracing_subscriber` layer for the `tracing` feature.
//!
//! Calling this is optional: without it, `tracing::instrument`ed
//! spans on the query core simply go nowhere. Respects
//! `RUST_LOG`/`RUST_LOG`-style `EnvFilter` syntax.
//! ```bash
//! RUST_LOG=corex=debug
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
