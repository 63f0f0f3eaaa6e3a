//! Axum router and handlers.
//!
//! Handlers are thin wrappers over [`TabularService`]: extract path/query
//! parameters, call the façade, return the JSON body. Soft failures are plain
//! 200 payloads built by the service; a [`ServiceError`] becomes a 500 with
//! the error string as the body.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::service::TabularService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<TabularService>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Build the application router over one service instance.
pub fn router(service: TabularService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/getFiles", get(get_files))
        .route("/getSheets", get(get_sheets_without_name))
        .route("/getSheets/{file_name}", get(get_sheets))
        .route("/getCSVInfo/{file_name}", get(get_csv_info))
        .route("/getExcelInfo/{file_name}/{sheet_name}", get(get_excel_info))
        .route("/getColumnInfo/{file_name}/{sheet_name}", get(get_column_info))
        .route(
            "/getDataRange/{file_name}/{offset}/{num_lines}/{sheet_name}",
            get(get_data_range),
        )
        .route("/getColumnData/{file_name}/{sheet_name}", get(get_column_data))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState {
            service: Arc::new(service),
        })
}

async fn get_files(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(state.service.list_files()?))
}

async fn get_sheets_without_name(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.service.sheets_without_name())
}

async fn get_sheets(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(state.service.sheets(&file_name)?))
}

async fn get_csv_info(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(state.service.csv_info(&file_name)?))
}

async fn get_excel_info(
    State(state): State<AppState>,
    Path((file_name, sheet_name)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(state.service.excel_info(&file_name, &sheet_name)?))
}

async fn get_column_info(
    State(state): State<AppState>,
    Path((file_name, sheet_name)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(state.service.column_info(&file_name, &sheet_name)?))
}

async fn get_data_range(
    State(state): State<AppState>,
    Path((file_name, offset, num_lines, sheet_name)): Path<(String, i64, i64, String)>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(
        state
            .service
            .data_range(&file_name, offset, num_lines, &sheet_name)?,
    ))
}

/// Repeated `columns=` query parameters, e.g. `?columns=2&columns=0&columns=2`.
#[derive(Debug, Deserialize)]
struct ColumnsQuery {
    #[serde(default)]
    columns: Vec<usize>,
}

async fn get_column_data(
    State(state): State<AppState>,
    Path((file_name, sheet_name)): Path<(String, String)>,
    Query(query): Query<ColumnsQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    Ok(Json(
        state
            .service
            .column_data(&file_name, &sheet_name, &query.columns)?,
    ))
}
