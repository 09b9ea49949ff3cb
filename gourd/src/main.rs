use std::path::Path;
use std::time::Duration;

use gourd::init_logger;
use gourd::server::Server;
use gourd_config::BasicConfiguration;
use gourd_data::dimension::Dimension;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// One game tick, 20 per second.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

const CONFIG_PATH: &str = "configuration.toml";

#[tokio::main]
async fn main() {
    let config = match BasicConfiguration::load(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };
    init_logger(&config.logging);

    let server = Server::new(config);
    server
        .plugin_manager
        .set_self_ref(server.plugin_manager.clone())
        .await;
    server.plugin_manager.set_server(server.clone()).await;

    server.create_world(Dimension::OVERWORLD).await;
    if server.basic_config.allow_nether {
        server.create_world(Dimension::NETHER).await;
    }
    info!("Server ready");

    let mut interval = tokio::time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = interval.tick() => server.tick().await,
            result = tokio::signal::ctrl_c() => {
                if let Err(signal_error) = result {
                    error!("Failed to listen for the shutdown signal: {signal_error}");
                }
                break;
            }
        }
    }

    info!("Shutting down");
    server.plugin_manager.unload_all_plugins().await;
}
