use std::sync::Arc;
use profile_store::config::{ServerArgs, ServerConfig};
use profile_store::engine::MemStore;
use profile_store::server::ApiServer;
use profile_store::ProfileReader;
use clap::Parser;
use log::info;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = ServerConfig::from_env(ServerArgs::parse())?;

    info!("Starting Profile Store...");
    let store = Arc::new(MemStore::open(&config.data_dir)?);
    info!("Store opened at {:?}. Loaded {} profile(s).", config.data_dir, store.len().await?);

    let server = ApiServer::new(store);
    server
        .listen(&config.bind_addr(), async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received. Draining in-flight requests...");
        })
        .await?;

    info!("Server stopped. Exiting.");
    Ok(())
}
