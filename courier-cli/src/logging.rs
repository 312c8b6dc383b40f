use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

const LIBRARY_TARGETS: [&str; 2] = ["prople_courier_core", "prople_courier_agent"];

/// Builds the `EnvFilter` directives for the binary and the courier libraries
pub fn build_directives(log_level: &str) -> String {
    let mut directives = vec![format!("{}={}", env!("CARGO_CRATE_NAME"), log_level)];
    for target in LIBRARY_TARGETS {
        directives.push(format!("{}={}", target, log_level));
    }

    directives.join(",")
}

/// A given `log_level` takes precedence over `RUST_LOG`, the default level is `debug`
pub fn init(log_level: Option<String>) {
    let filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(build_directives(&level)),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| build_directives("debug").into()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}
