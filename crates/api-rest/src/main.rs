//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without the workspace runner.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). Deployments run the workspace's main
//! `testreg-run` binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the testreg REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000) with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `TESTREG_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `TESTREG_DEFAULT_APPOINTMENT_TYPE`: classification fallback
/// - `TESTREG_HEALTH_CENTER_LEAD_HOURS` / `TESTREG_HOME_LEAD_HOURS`:
///   appointment lead times
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values cannot be parsed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("TESTREG_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting testreg REST API on {}", addr);

    let state = api_rest::state_from_env()?;
    let app = api_rest::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
