use tracing_subscriber::EnvFilter;

use prontuario_api::config::ApiConfig;
use prontuario_api::state::AppState;
use prontuario_storage::client::build_client_with_region;
use prontuario_storage::store::S3ObjectStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(bucket = %config.bucket, region = %config.region, "starting prontuario api");

    let verifier = config.auth.verifier()?;
    if config.auth.dev_user_ids {
        tracing::warn!("bare user id tokens accepted, local use only");
    }

    let s3 = build_client_with_region(&config.region).await;
    let state = AppState::new(
        S3ObjectStore::new(s3, config.bucket),
        config.styles,
        verifier,
    );

    let app = prontuario_api::app(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
