//! Notebook Service — topic-indexed notes over RPC.
//!
//! Keeps every note in one JSON document on disk and exposes add/list
//! operations plus an encyclopedia reference lookup as JSON RPC endpoints.
//!
//! Default: http://127.0.0.1:8000/

mod config;
mod encyclopedia_client;
mod error;
mod notes;
mod routes;
#[cfg(test)]
mod test_support;

use config::Config;
use encyclopedia_client::EncyclopediaClient;
use notes::NoteStore;
use routes::AppState;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let encyclopedia =
        match EncyclopediaClient::new(&config.encyclopedia_url, config.encyclopedia_timeout) {
            Ok(client) => client,
            Err(e) => {
                log::error!("Failed to build encyclopedia client: {}", e);
                std::process::exit(1);
            }
        };

    let store = NoteStore::new(&config.database_path);
    log::info!("Notebook document: {:?}", store.path());
    log::info!(
        "Encyclopedia endpoint: {} (timeout {}s)",
        encyclopedia.endpoint(),
        config.encyclopedia_timeout.as_secs()
    );

    let state = Arc::new(AppState::new(store, encyclopedia));

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::router(state).layer(cors);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    log::info!("Notebook Service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
