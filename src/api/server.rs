//! API Server Module
//!
//! This module contains the server setup functionality for the API system.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::{analyze_transcript_handler, call_tool, health_check, list_tools, ApiState};
use crate::config::ServerConfig;

/// Build the application router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Transcript analysis
        .route("/api/analyze-transcript", post(analyze_transcript_handler))
        // Workbench tools
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name/call", post(call_tool))
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ServerConfig,
    /// Shared state
    state: Arc<ApiState>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ServerConfig, state: ApiState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// Start the API server
    pub async fn start(&self) -> Result<()> {
        let addr = self.config.bind_addr();
        info!("Starting pharma-investigator API server on {}", addr);

        let app = router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("API server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        Ok(())
    }
}
