//! kwscout service entry point.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use kwscout_core::{TracingConfig, init_tracing};
use kwscout_provider::GoogleAdsClient;
use kwscout_server::{AppState, KeywordService, ServerConfig, ServerError, ServerResult, router};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_tracing(TracingConfig::service()) {
        eprintln!("failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ServerResult<()> {
    let config = ServerConfig::from_env()?;

    let client = GoogleAdsClient::new(config.provider.clone())
        .map_err(|e| ServerError::config(e.to_string()))?;
    let service = Arc::new(KeywordService::new(Arc::new(client)));
    let app = router(AppState { service });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "kwscout listening");

    axum::serve(listener, app).await?;
    Ok(())
}
