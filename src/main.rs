//! Main entry point for the testreg application.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Starts the testreg REST server.
///
/// Environment is loaded from `.env` when present; configuration is resolved
/// once here and handed to the API layer.
///
/// # Environment Variables
/// - `TESTREG_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TESTREG_DEFAULT_APPOINTMENT_TYPE`: appointment type used when
///   classification cannot decide (default: "AT_HEALTH_CENTER")
/// - `TESTREG_HEALTH_CENTER_LEAD_HOURS`: lead time before a health-center
///   visit (default: 24)
/// - `TESTREG_HOME_LEAD_HOURS`: lead time before a home visit (default: 48)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("testreg=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TESTREG_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting testreg REST on {}", rest_addr);

    let state = api_rest::state_from_env()?;
    let app = api_rest::router(state);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
