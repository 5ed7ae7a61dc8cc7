//! HTTP front end for momgen
//!
//! One route: `GET /` serves the email form, `POST /` returns the generated
//! minutes document as a download.

mod handlers;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Settings;
use crate::template::TemplateFiller;

pub use handlers::{generate, index, GenerateForm, FORM_PAGE};

/// State shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub filler: TemplateFiller,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            filler: TemplateFiller::new(settings.template.path.clone(), settings.output_dir()),
        }
    }
}

/// Build the router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(settings: Settings) -> Result<()> {
    let bind = settings.server.bind.clone();
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    serve_on(listener, settings, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, settings: Settings, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if !settings.template.path.exists() {
        tracing::warn!(
            "Template {} does not exist yet; requests will fail until it does",
            settings.template.path.display()
        );
    }

    info!(
        "Serving MoM generator on http://{} (template: {})",
        listener.local_addr()?,
        settings.template.path.display()
    );

    let app = build_router(AppState::new(&settings));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
    }
}
