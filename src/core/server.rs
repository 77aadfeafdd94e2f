// Application server configuration and setup

use axum::{extract::DefaultBodyLimit, Router};
use anyhow::Result;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::api::fasum::routes::fasum_routes;
use crate::api::users::routes::user_routes;
use crate::config::environment::EnvironmentVariables;
use crate::config::state::AppState;

/// Creates the application router: resource routers under `/api`, static
/// assets as the fallback, CORS and body-limit layers on top.
pub fn create_app(state: AppState) -> Router {
    let static_dir: String = state.environment.static_dir.to_string();

    // Existing clients reach the user table under both spellings.
    let api_router: Router<AppState> = Router::new()
        .nest("/users", user_routes())
        .nest("/user", user_routes())
        .nest("/fasum", fasum_routes());

    Router::new()
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(state.environment.max_request_body_size)),
        )
        .with_state(state)
}

/// Sets up the TCP listener from environment or binds to new address
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    let listener: TcpListener = match listenfd.take_tcp_listener(0)? {
        Some(std_listener) => {
            std_listener.set_nonblocking(true)?;
            TcpListener::from_std(std_listener)?
        }
        None => {
            let addr: String = format!("{}:{}", env.host, env.port);
            TcpListener::bind(&addr).await?
        }
    };

    Ok(listener)
}

/// Handles graceful shutdown signals (Ctrl+C and TERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate: std::future::Pending<()> = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutting down via Ctrl+C"),
        _ = terminate => tracing::info!("Shutting down via TERM signal"),
    }
}
