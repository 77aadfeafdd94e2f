use anyhow::Result;

use fasum_admin::config::state::AppState;
use fasum_admin::core::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();

    let state: AppState = AppState::from_env()?;
    let app = server::create_app(state.clone());

    let listener = server::setup_listener(&state.environment).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
