use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use idsmith_uuid::{GeneratorConfig, UuidService, node_id_from_env_value};

/// Main entry point for the idsmith service
///
/// Resolves configuration once, then serves the REST API.
///
/// # Environment Variables
/// - `IDSMITH_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `IDSMITH_NODE_ID`: node id for v1/v6 UUIDs as 12 hex digits, optionally `:`/`-`
///   separated (default: random, drawn on first use)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `IDSMITH_NODE_ID` is set but malformed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("idsmith_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("IDSMITH_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let node_id = node_id_from_env_value(std::env::var("IDSMITH_NODE_ID").ok())?;
    if node_id.is_some() {
        tracing::info!("-- Using configured node id for v1/v6 UUIDs");
    }

    let state = AppState::new(UuidService::with_config(GeneratorConfig::new(node_id)));

    tracing::info!("++ Starting idsmith REST on {}", rest_addr);
    api_rest::serve(&rest_addr, state).await?;

    Ok(())
}
