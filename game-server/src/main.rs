use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use game_persistence::{connection::connect_and_migrate, repositories::ScoreRepository};
use game_server::{
    config::Config, create_routes, sessions::SessionStore,
    words::{GraniteWordProvider, WordProvider},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting word guess server...");

    let config = Config::new();
    let sessions = Arc::new(SessionStore::new());

    let word_provider: Arc<dyn WordProvider> = Arc::new(GraniteWordProvider::new(&config));
    if config.ibm_api_key.is_none() {
        info!("IBM_API_KEY not set, words will come from the fallback tables");
    }

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let scores = Arc::new(ScoreRepository::new(db));

    let routes = create_routes(sessions.clone(), word_provider, scores, &config);

    // Evict idle sessions in the background
    let session_ttl = Duration::from_secs(config.session_ttl_minutes * 60);
    let eviction_sessions = sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let evicted = eviction_sessions.evict_idle(session_ttl);
            if evicted > 0 {
                info!(
                    "Evicted {} idle sessions, {} remaining",
                    evicted,
                    eviction_sessions.len()
                );
            }
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
