use tokio::net::TcpListener;

use tinywiki::logger::Logger;
use tinywiki::{build_router, AppState, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::default();
    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(state);

    let addr = config.socket_addr();
    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
