//! HTTP API server exposing the summarization pipeline.

use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{FailureKind, Pipeline, PipelineResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let pipeline = Pipeline::new(settings)?;
    let state = Arc::new(AppState { pipeline });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/summarize", post(summarize))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Oppsum API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Summarize", "POST /summarize");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct SummarizeRequest {
    /// YouTube URL or video ID
    #[serde(default)]
    url: Option<String>,
}

#[derive(Serialize)]
struct SummarizeResponse {
    video_id: String,
    title: String,
    channel: String,
    transcript: String,
    summary: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Validate the request body, returning the URL to summarize.
fn validate_request(req: &SummarizeRequest) -> Result<&str, &'static str> {
    match req.url.as_deref() {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err("No URL provided"),
    }
}

/// HTTP status for a pipeline failure category.
fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidInput
        | FailureKind::Metadata
        | FailureKind::TranscriptUnavailable => StatusCode::BAD_REQUEST,
        FailureKind::Summarization | FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> impl IntoResponse {
    // Reject missing URLs before touching any external capability
    let url = match validate_request(&req) {
        Ok(url) => url,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: message.to_string(),
                }),
            )
                .into_response();
        }
    };

    match state.pipeline.summarize_url(url).await {
        PipelineResult::Success {
            video,
            transcript,
            summary,
        } => Json(SummarizeResponse {
            video_id: video.id,
            title: video.title,
            channel: video.channel_name,
            transcript,
            summary,
        })
        .into_response(),
        PipelineResult::Failure { kind, message } => (
            failure_status(kind),
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_request() {
        assert!(validate_request(&SummarizeRequest { url: None }).is_err());
        assert!(validate_request(&SummarizeRequest {
            url: Some("   ".to_string())
        })
        .is_err());
        assert_eq!(
            validate_request(&SummarizeRequest {
                url: Some("https://youtu.be/dQw4w9WgXcQ".to_string())
            }),
            Ok("https://youtu.be/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_failure_status_mapping() {
        assert_eq!(
            failure_status(FailureKind::InvalidInput),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure_status(FailureKind::TranscriptUnavailable),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            failure_status(FailureKind::Summarization),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            failure_status(FailureKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
