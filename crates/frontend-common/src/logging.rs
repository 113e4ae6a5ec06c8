//! Tracing setup
//!
//! In the browser, events go to the developer console through `tracing-web`.
//! Natively they go to stderr, filtered by `RUST_LOG`.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

/// Install the global subscriber at `info`. Later calls are ignored.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

#[cfg(target_arch = "wasm32")]
pub fn init_with_level(level: LevelFilter) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new())
        .with_filter(level);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_with_level(level: LevelFilter) {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(env_filter)
        .try_init();
}
