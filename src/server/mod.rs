//! HTTP surface over the batch aggregator and the export formatters.
//!
//! One route does the work: `POST /api/analyze` takes `{ "handles": [...] }`
//! and answers `200` with independent success/error tracks, or `400` with
//! `{ "message": ... }` when the request itself is invalid. Export routes
//! render the posted dataset as downloadable artifacts; nothing is
//! persisted server-side.

use crate::batch::{self, BatchError, FetchFailure};
use crate::handles::canonical_handle;
use crate::reports;
use crate::resolver::{AccountMetrics, MetricsResolver};
use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::Arc;

/// Shared state: the resolver every analyze request fans out over.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn MetricsResolver>,
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState").field("resolver", &"<dyn MetricsResolver>").finish()
    }
}

#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/export/csv", post(export_csv))
        .route("/api/export/xlsx", post(export_xlsx))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub handles: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub data: Vec<AccountMetrics>,
    pub errors: Vec<FetchFailure>,
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "message": message }))).into_response()
}

async fn analyze(State(state): State<AppState>, payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Response {
    let Ok(Json(request)) = payload else {
        return bad_request("request body must be a JSON object with a `handles` array");
    };
    let Some(raw_handles) = request.handles else {
        return bad_request("`handles` must be an array of strings");
    };
    if raw_handles.is_empty() {
        return bad_request("`handles` must not be empty");
    }

    let handles: Vec<String> = raw_handles.iter().map(String::as_str).filter_map(canonical_handle).collect();

    match batch::resolve_batch(state.resolver.as_ref(), &handles).await {
        Ok(outcome) => {
            log::info!("analyzed batch: {} resolved, {} failed", outcome.records.len(), outcome.failures.len());
            (
                StatusCode::OK,
                Json(AnalyzeResponse {
                    data: outcome.records,
                    errors: outcome.failures,
                }),
            )
                .into_response()
        }
        Err(err @ BatchError::NoValidHandles) => bad_request(&err.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub records: Option<Vec<AccountMetrics>>,
}

/// Unpack an export payload, or answer with the 400 the caller returns.
fn export_records(payload: Result<Json<ExportRequest>, JsonRejection>) -> Result<Vec<AccountMetrics>, Response> {
    match payload {
        Ok(Json(ExportRequest { records: Some(records) })) => Ok(records),
        _ => Err(bad_request("request body must be a JSON object with a `records` array")),
    }
}

async fn export_csv(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let records = match export_records(payload) {
        Ok(records) => records,
        Err(response) => return response,
    };

    let mut contents = String::new();
    if let Err(err) = reports::generate_csv(&records, &mut contents) {
        return internal_error(&err);
    }

    attachment(
        "text/csv; charset=utf-8",
        &reports::export_file_name("csv", chrono::Local::now()),
        contents.into_bytes(),
    )
}

async fn export_xlsx(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let records = match export_records(payload) {
        Ok(records) => records,
        Err(response) => return response,
    };

    let mut buffer = Cursor::new(Vec::new());
    if let Err(err) = reports::generate_xlsx(&records, &mut buffer) {
        return internal_error(&err);
    }

    attachment(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &reports::export_file_name("xlsx", chrono::Local::now()),
        buffer.into_inner(),
    )
}

fn attachment(content_type: &str, file_name: &str, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{file_name}\"")),
        ],
        body,
    )
        .into_response()
}

fn internal_error(err: &ohno::AppError) -> Response {
    log::error!("export failed: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "message": "failed to render export" })),
    )
        .into_response()
}
