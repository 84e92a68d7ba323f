use mimalloc::MiMalloc;
use sambaza::config::Config;
use sambaza::gateway::AfricasTalkingClient;
use sambaza::server::router::{AppState, sambaza_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.server.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database.url,
        loglevel = %cfg.server.loglevel,
        listen_addr = %cfg.server.listen_addr,
        listen_port = cfg.server.listen_port,
        username = %cfg.africastalking.username,
        sender_id = %cfg.africastalking.sender_id,
        "starting sambaza"
    );

    let pool = sambaza::db::store::connect(&cfg.database.url).await?;
    let gateway = Arc::new(AfricasTalkingClient::new(cfg.africastalking.clone()));

    let state = AppState::new(pool, gateway);
    let app = sambaza_router(state);

    let addr = SocketAddr::from((cfg.server.listen_addr, cfg.server.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => { /* ... */ },
        _ = terminate => { /* ... */ },
    }
}
