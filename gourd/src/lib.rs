pub mod block;
pub mod entity;
pub mod plugin;
pub mod server;
pub mod world;

use gourd_config::LoggingConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber according to the logging section of
/// the configuration. Call once, before anything logs.
pub fn init_logger(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.color)
        .with_thread_names(config.threads)
        .with_thread_ids(config.threads);

    if config.timestamps {
        let timer = fmt::time::UtcTime::new(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.with_timer(timer))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.without_time())
            .init();
    }
}
