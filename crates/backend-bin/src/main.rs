use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use tourgate_backend_lib::{config::Settings, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    let state = Arc::new(AppState::new(settings.clone())?);
    let app = router::create_router(state);

    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
