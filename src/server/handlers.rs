use super::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use crate::{Error, chat::ChatService};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatService>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected chat request body: {}", rejection);
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let text = request.text.unwrap_or_default();
    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id);

    async move {
        info!("Received chat request ({} chars)", text.chars().count());

        match state.chat.respond(&text).await {
            Ok(reply) => {
                info!(sentiment = %reply.sentiment, "Chat request completed");
                Ok(Json(ChatResponse {
                    sentiment: reply.sentiment,
                    response: reply.response,
                }))
            }
            Err(Error::EmptyInput) => Err(api_error(
                StatusCode::BAD_REQUEST,
                "No input text provided.",
            )),
            Err(e) => {
                error!("Failed to process chat request: {}", e);
                Err(api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sentiment analysis failed.",
                ))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
