pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    chat::{ChatService, ReplySettings},
    config::{Config, CorsConfig},
    llm::OpenAiClient,
    sentiment::{self, LabelMap},
};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub fn router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .layer(cors_layer(cors)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if config.allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any).allow_headers(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| Error::config(format!("Invalid CORS origin: '{}'", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(origins)
        .allow_headers(AllowHeaders::mirror_request()))
}

pub async fn run(config: Config) -> Result<()> {
    if config.llm.api_key.is_empty() {
        error!("OPENAI_API_KEY not set; replies will fall back to the apology message");
    }

    let classifier = sentiment::build_or_unavailable(&config.sentiment);
    let llm = OpenAiClient::new(&config.llm);
    info!("Using completion model {}", llm.model());

    let chat = ChatService::new(
        classifier,
        Arc::new(llm),
        LabelMap::new(config.sentiment.labels.clone()),
        ReplySettings::from(&config.llm),
    );

    let app_state = AppState {
        chat: Arc::new(chat),
    };

    let app = router(app_state, &config.server.cors)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_rejects_invalid_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()],
        };

        assert!(cors_layer(&config).is_err());
    }

    #[test]
    fn test_cors_accepts_listed_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };

        assert!(cors_layer(&config).is_ok());
    }
}
