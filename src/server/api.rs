use crate::error::RelayError;
use crate::models::api::{ ChatRequest, ChatResponse, ErrorResponse, HealthResponse };
use crate::relay::{ validate_message, ChatRelay };
use std::path::Path;
use axum::{
    routing::{get, post},
    Router,
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    http::StatusCode,
};
use chrono::{ SecondsFormat, Utc };
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use log::{info, warn, error};

pub const SERVICE_NAME: &str = "AI Chatbot API";

#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
    pub production: bool,
    pub environment: String,
}

pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSON API under `/api` (with bare aliases), everything else from
/// `static_dir`, falling back to its `index.html`. A GET on a chat path
/// gets the static client too.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();
    let spa = ServeDir::new(static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler).get_service(spa.clone()))
        .route("/api/health", get(health_handler))
        .route("/chat", post(chat_handler).get_service(spa.clone()))
        .route("/health", get(health_handler))
        .fallback_service(spa)
        .layer(cors)
        .with_state(state)
}

pub fn error_response(err: &RelayError, production: bool) -> Response {
    match err {
        RelayError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse {
                error: message.clone(),
                details: None,
            })).into_response()
        }
        RelayError::Config(_) | RelayError::Upstream(_) => {
            let details = if production {
                "Internal server error".to_string()
            } else {
                err.to_string()
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse {
                error: "Failed to process message".into(),
                details: Some(details),
            })).into_response()
        }
    }
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Rejected chat request body: {}", rejection.body_text());
            let err = RelayError::Validation(rejection.body_text());
            return error_response(&err, state.production);
        }
    };

    info!(
        "Received chat request: chat_id={:?}, message_length={:?}",
        req.chat_id,
        req.message.as_ref().map(|m| m.chars().count())
    );

    let message = match validate_message(req.message.as_deref()) {
        Ok(m) => m,
        Err(e) => return error_response(&e, state.production),
    };

    match state.relay.process_message(message).await {
        Ok(response) => {
            info!("AI response generated successfully");
            (StatusCode::OK, Json(ChatResponse {
                response,
                chat_id: req.chat_id.clone(),
                timestamp: iso_timestamp(),
            })).into_response()
        }
        Err(e) => {
            error!("Chat error: {}", e);
            error_response(&e, state.production)
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".into(),
        timestamp: iso_timestamp(),
        service: SERVICE_NAME.into(),
        environment: state.environment.clone(),
    })
}
