//! hunt-daemon: the scavenger hunt event daemon.
//!
//! Single OS process running a Tokio async runtime. Clients (player and
//! organizer UIs) communicate with the daemon via JSON-RPC over a Unix
//! socket.

mod bootstrap;
mod commands;
mod config;
mod rpc;

use std::sync::Arc;

use tracing::{error, info};

use crate::config::DaemonConfig;
use crate::rpc::RpcServer;

/// Daemon-wide shared state.
pub struct DaemonState {
    /// Database connection. All writes serialize through this lock; the
    /// engine opens a SQLite transaction per operation underneath it.
    pub db: Arc<tokio::sync::Mutex<rusqlite::Connection>>,
    /// Configuration.
    pub config: DaemonConfig,
    /// Photo proof storage.
    pub photos: hunt_media::PhotoStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hunt=info".parse()?),
        )
        .init();

    info!("Hunt daemon starting");

    // 1. Load config
    let config = DaemonConfig::load()?;
    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    // 2. Open database and run first-start provisioning
    let db_path = data_dir.join("hunt.db");
    let conn = hunt_db::open(&db_path)?;
    bootstrap::run(&conn, &config)?;
    let db = Arc::new(tokio::sync::Mutex::new(conn));

    // 3. Open the photo store
    let photos = hunt_media::PhotoStore::open(config.upload_dir())?;

    // 4. Build daemon state
    let state = Arc::new(DaemonState { db, config, photos });

    // 5. Run the RPC server until shutdown
    let socket_path = data_dir.join("hunt.sock");
    let rpc_server = RpcServer::new(state, socket_path.clone());

    info!("Starting JSON-RPC server on {:?}", socket_path);

    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    // Clean up socket file
    let _ = std::fs::remove_file(&socket_path);

    info!("Daemon stopped");
    Ok(())
}
