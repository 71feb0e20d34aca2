use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// `verbose` raises the crate's own events to DEBUG; otherwise they are kept
/// at `quiet`. `RUST_LOG` overrides the level for everything else.
pub fn init_logging(verbose: bool, quiet: LevelFilter) {
    let level_filter = if verbose { LevelFilter::DEBUG } else { quiet };
    let app_filter = Targets::new()
        .with_target("macrodash", level_filter)
        .with_target("tower_http", level_filter);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time())
        .with(app_filter)
        .with(env_filter)
        .init();
}
