//! HTTP API for PDF text extraction
//!
//! Endpoints:
//! - POST /extract-text - Multipart upload (field `file`), returns extracted text
//! - GET /health - Liveness and version
//!
//! Failures are reported as `{"error": "..."}`. Unless strict status is
//! configured, they keep the 200 status and callers must check the body.

use crate::config::{ExtractOptions, ServerConfig};
use crate::pdf_extractor::{self, ExtractError, Extraction};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const FILE_FIELD: &str = "file";

// ============================================================================
// AppState
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    options: ExtractOptions,
    start_time: Instant,
}

impl AppState {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            start_time: Instant::now(),
        }
    }
}

// ============================================================================
// Error type
// ============================================================================

/// Any failure at the handler boundary, rendered as `{"error": msg}`
#[derive(Debug)]
pub struct HandlerError(StatusCode, String);

impl HandlerError {
    /// `strict` is only used when the service is configured for strict status codes.
    fn new(options: &ExtractOptions, strict: StatusCode, msg: impl Into<String>) -> Self {
        let status = if options.strict_status { strict } else { StatusCode::OK };
        HandlerError(status, msg.into())
    }

    fn from_extract(options: &ExtractOptions, err: ExtractError) -> Self {
        let strict = if err.is_client_input() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        Self::new(options, strict, err.to_string())
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.0, Json(ErrorResponse { error: self.1 })).into_response()
    }
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ExtractResponse {
    pub text: String,
    #[serde(rename = "pageCount", default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
}

impl ExtractResponse {
    fn new(extraction: Extraction, options: &ExtractOptions) -> Self {
        Self {
            text: extraction.text,
            page_count: options.include_page_count.then_some(extraction.page_count),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

struct Upload {
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router from server configuration
pub fn router(config: &ServerConfig) -> Router {
    let state = AppState::new(config.extract_options());

    let mut app = Router::new()
        .route("/extract-text", post(extract_text_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    // No cap unless one is configured; axum would otherwise apply its own 2 MiB default
    app = match config.max_upload_bytes {
        Some(limit) => app.layer(DefaultBodyLimit::max(limit)),
        None => app.layer(DefaultBodyLimit::disable()),
    };
    if config.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(TraceLayer::new_for_http())
}

// ============================================================================
// Handlers
// ============================================================================

// POST /extract-text
async fn extract_text_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, HandlerError> {
    let options = state.options;

    let multipart = multipart.map_err(|e| {
        tracing::warn!(error = %e, "Rejected non-multipart upload");
        HandlerError::new(&options, e.status(), e.body_text())
    })?;

    let upload = read_upload(multipart)
        .await
        .map_err(|(status, msg)| {
            tracing::warn!(error = %msg, "Failed to read upload");
            HandlerError::new(&options, status, msg)
        })?;

    let started = Instant::now();
    let size = upload.bytes.len();
    let bytes = upload.bytes;
    let result = tokio::task::spawn_blocking(move || pdf_extractor::extract_text(&bytes)).await;

    let extraction = match result {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(e)) => {
            tracing::warn!(
                filename = ?upload.filename,
                bytes = size,
                error = %e,
                "PDF extraction failed"
            );
            return Err(HandlerError::from_extract(&options, e));
        }
        Err(e) => {
            tracing::error!(filename = ?upload.filename, error = %e, "Extraction task failed");
            return Err(HandlerError::new(
                &options,
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Extraction task failed: {}", e),
            ));
        }
    };

    tracing::info!(
        filename = ?upload.filename,
        content_type = ?upload.content_type,
        bytes = size,
        pages = extraction.page_count,
        chars = extraction.text.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extracted text"
    );

    Ok(Json(ExtractResponse::new(extraction, &options)))
}

// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Pull the `file` field out of the form, skipping any other fields
async fn read_upload(mut multipart: Multipart) -> Result<Upload, (StatusCode, String)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            e.status(),
            format!("Failed to parse multipart data: {}", e.body_text()),
        )
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| {
                (
                    e.status(),
                    format!("Failed to read uploaded file: {}", e.body_text()),
                )
            })?;

        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    Err((
        StatusCode::BAD_REQUEST,
        format!("Missing multipart field '{}'", FILE_FIELD),
    ))
}
