//! REST API routes.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::loops::session_loop::{SessionCommand, SessionView};
use crate::state::AppState;
use route_core::{DisplayModel, EditEvent, ExportFile, ExportFormat, OpenPicker};
use route_overpass::lookup_labels;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/session", get(get_session))
        .route("/v1/session/start", post(start_session))
        .route("/v1/session/stop", post(stop_session))
        .route("/v1/session/events", post(post_event))
        .route("/v1/session/descriptions/:index", put(put_description))
        .route("/v1/session/export", get(export_session))
        .route("/v1/session/picker/open/:index", post(open_picker))
        .route("/v1/session/picker/confirm", post(confirm_picker))
        .route("/v1/session/picker/cancel", post(cancel_picker))
        .route("/v1/seamarks/nearest", get(nearest_seamarks))
        .route("/api/export", post(download_export))
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub model: Option<DisplayModel>,
}

async fn snapshot(state: &AppState) -> Result<SessionView, ApiError> {
    Ok(state.request(|reply| SessionCommand::Snapshot { reply }).await?)
}

async fn apply_event(state: &AppState, event: EditEvent) -> Result<Option<DisplayModel>, ApiError> {
    let result = state
        .request(|reply| SessionCommand::Event { event, reply })
        .await?;
    Ok(result?)
}

/// Current session state.
pub async fn get_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    snapshot(&state).await.map(Json)
}

/// Start an edit session (enter drawing mode).
pub async fn start_session(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    apply_event(&state, EditEvent::StartEdit).await?;
    let view = snapshot(&state).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Stop the session and discard the route.
pub async fn stop_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, ApiError> {
    apply_event(&state, EditEvent::StopEdit).await?;
    snapshot(&state).await.map(Json)
}

/// Forward a map or panel event to the session.
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<EditEvent>,
) -> Result<Json<EventResponse>, ApiError> {
    let model = apply_event(&state, event).await?;
    Ok(Json(EventResponse { model }))
}

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub text: String,
}

/// Set the description of `desc_<index>`.
pub async fn put_description(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(req): Json<DescriptionRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let model = apply_event(
        &state,
        EditEvent::SetDescription {
            index,
            text: req.text,
        },
    )
    .await?;
    Ok(Json(EventResponse { model }))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: String,
    #[serde(default)]
    pub name: String,
}

/// Render the route in the requested format as `{mimetype, filename, content}`.
pub async fn export_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportFile>, ApiError> {
    let format: ExportFormat = query.format.parse().map_err(ApiError::BadRequest)?;
    let trip_name = query.name;
    let file = state
        .request(|reply| SessionCommand::Export {
            format,
            trip_name,
            reply,
        })
        .await??;
    Ok(Json(file))
}

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,
}

/// Nearest feature labels. `labels` is null when the lookup failed.
pub async fn nearest_seamarks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !query.lat.is_finite() || !query.lon.is_finite() {
        return Err(ApiError::BadRequest("lat and lon must be finite".into()));
    }
    let labels = lookup_labels(state.overpass(), query.lat, query.lon).await;
    Ok(Json(json!({ "labels": labels })))
}

/// Look up labels near the arrival point of segment `index` and show them.
///
/// The open-picker guard is checked before the network call and again when
/// the result arrives.
pub async fn open_picker(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<OpenPicker>, ApiError> {
    let (lat, lon) = state
        .request(|reply| SessionCommand::PickerTarget { index, reply })
        .await??;

    let options = lookup_labels(state.overpass(), lat, lon).await;

    let picker = state
        .request(|reply| SessionCommand::OpenPicker {
            index,
            options,
            reply,
        })
        .await??;
    Ok(Json(picker))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub label: String,
}

/// Write the chosen label into the picker's target description.
pub async fn confirm_picker(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let label = req.label;
    let model = state
        .request(|reply| SessionCommand::ConfirmPicker { label, reply })
        .await??;
    Ok(Json(EventResponse { model: Some(model) }))
}

/// Close the picker without touching any description.
pub async fn cancel_picker(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, ApiError> {
    let cancelled = state
        .request(|reply| SessionCommand::CancelPicker { reply })
        .await??;
    Ok(Json(json!({ "cancelled": cancelled.is_some() })))
}

/// Echo a submitted export back as a file download.
pub async fn download_export(Form(file): Form<ExportFile>) -> impl IntoResponse {
    let filename = attachment_name(&file.filename);
    tracing::info!("Serving download {} ({} bytes)", filename, file.content.len());
    (
        [
            (header::CONTENT_TYPE, header_safe(&file.mimetype, "application/octet-stream")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        file.content,
    )
}

fn attachment_name(filename: &str) -> String {
    header_safe(&filename.replace(['"', '\\', '/'], ""), "route")
}

/// Keep printable ASCII only, falling back when nothing is left.
fn header_safe(value: &str, fallback: &str) -> String {
    let cleaned: String = value.chars().filter(|c| c.is_ascii_graphic() || *c == ' ').collect();
    match cleaned.trim() {
        "" => fallback.to_string(),
        trimmed => trimmed.to_string(),
    }
}
