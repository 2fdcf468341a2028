use anyhow::Result;
use energy_calculators::{api, config::Config, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    let state = api::AppState::new(&cfg);
    let app = api::router(state, &cfg);

    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting energy calculators service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}
