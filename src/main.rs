mod app_state;
mod config;
mod database;
mod models;
mod routes;
pub use app_state::AppState;
pub use config::Config;

use crate::routes::make_app;
use dotenv::dotenv;
use std::{process, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit status telling the process supervisor not to respawn us
const EXIT_STORAGE_UNAVAILABLE: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::init();
    configure_logger(&config.log_level);

    info!("{}", "*".repeat(70));
    info!("{:*^70}", "  A C C O U N T   S E R V I C E   R U N N I N G  ");
    info!("{}", "*".repeat(70));

    let db = match database::connect(&config.db_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("{}: Cannot continue", e);
            process::exit(EXIT_STORAGE_UNAVAILABLE);
        }
    };

    let port = config.port;
    let app = make_app(Arc::new(AppState { db, config }));
    info!("Service initialized!");

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("🚀 Server started successfully on port {}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn configure_logger(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
