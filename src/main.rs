use std::sync::Arc;

use anyhow::Context;
use infosec_assistant::config::Config;
use infosec_assistant::observability::init_tracing;
use infosec_assistant::{server, Assistant};
use tokio::net::TcpListener;

fn load_config() -> anyhow::Result<Config> {
    #[cfg(feature = "yaml")]
    if let Ok(path) = std::env::var("ASSISTANT_CONFIG") {
        return Config::from_yaml_file(&path)
            .with_context(|| format!("failed to load config file '{path}'"));
    }
    Config::from_env().context("failed to load configuration from environment")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.log_level);

    let assistant = Arc::new(
        Assistant::from_config(&config.model).context("failed to build model client")?,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!(
        "infosec-assistant listening on http://{} (model '{}', backend '{}')",
        addr,
        assistant.model,
        assistant.backend_name()
    );

    server::serve(listener, assistant).await?;
    Ok(())
}
