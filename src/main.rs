//! SSR host binary.

use folio::config::ClientConfig;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let (app, addr) = match folio::server::site_router() {
        Ok(site) => site,
        Err(e) => {
            tracing::error!(error = %e, "site setup failed");
            std::process::exit(1);
        }
    };

    let config = ClientConfig::load();
    tracing::info!(api_base_url = %config.api_base_url, "using backend");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "folio listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
