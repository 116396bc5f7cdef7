use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cappy_api::{build_router, config::Config, state::AppState};
use cappy_chat::{Assistant, AssistantBuilder};
use cappy_context::FileCorpusLoader;
use cappy_llm::{ChatClient, ClientFactory, GeminiConfig, ProviderConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config);

    tracing::info!("Starting Cappy API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let assistant = build_assistant(&config);
    tracing::info!(
        model = assistant.model(),
        selector = assistant.pipeline().selector().name(),
        llm_configured = assistant.has_client(),
        "Assistant ready"
    );

    let state = Arc::new(AppState::new(config.clone(), assistant));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_assistant(config: &Config) -> Assistant {
    let loader = FileCorpusLoader::new(&config.context.corpus_path);

    AssistantBuilder::new()
        .corpus_from(&loader)
        .selector_config(config.context.selector_config())
        .persona(config.persona.clone())
        .maybe_client(build_client(config))
        .model(config.llm.model.clone())
        .options(config.llm.generate_options())
        .build()
}

/// Gemini client when an API key is present; the assistant answers with a
/// fallback message otherwise
fn build_client(config: &Config) -> Option<Arc<dyn ChatClient>> {
    let Some(api_key) = config.google_api_key.as_deref() else {
        tracing::warn!("GOOGLE_API_KEY not set, replies will use the unavailable fallback");
        return None;
    };

    let mut gemini = GeminiConfig::new(api_key).with_timeout_secs(config.llm.request_timeout_secs);
    if let Some(base_url) = &config.llm.base_url {
        gemini = gemini.with_base_url(base_url.clone());
    }

    match ClientFactory::create_client(ProviderConfig::gemini(gemini)) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!(error = %e, "Failed to configure Gemini client");
            None
        }
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
