use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::HistoryController;
use crate::dto::{ApiResponse, HistoryDetailsResponse, RecordCompletionRequest, UpdateHistoryRequest};
use crate::middleware::AuthenticatedOwner;
use crate::models::MaintenanceHistoryEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_history_router() -> Router<AppState> {
    Router::new()
        .route("/", post(record_completion))
        .route("/list/:maintenance_id", get(list_history))
        .route("/details/:history_id", get(history_details))
        .route("/:history_id", patch(update_history).delete(delete_history))
}

async fn record_completion(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Json(request): Json<RecordCompletionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceHistoryEntry>>), AppError> {
    let controller = HistoryController::new(&state);
    let response = controller.record(owner.owner_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_history(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(maintenance_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<MaintenanceHistoryEntry>>>, AppError> {
    let controller = HistoryController::new(&state);
    let response = controller.list(owner.owner_id, maintenance_id).await?;
    Ok(Json(response))
}

async fn history_details(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(history_id): Path<Uuid>,
) -> Result<Json<ApiResponse<HistoryDetailsResponse>>, AppError> {
    let controller = HistoryController::new(&state);
    let response = controller.details(owner.owner_id, history_id).await?;
    Ok(Json(response))
}

async fn update_history(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(history_id): Path<Uuid>,
    Json(request): Json<UpdateHistoryRequest>,
) -> Result<Json<ApiResponse<MaintenanceHistoryEntry>>, AppError> {
    let controller = HistoryController::new(&state);
    let response = controller.update(owner.owner_id, history_id, request).await?;
    Ok(Json(response))
}

async fn delete_history(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(history_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = HistoryController::new(&state);
    let response = controller.delete(owner.owner_id, history_id).await?;
    Ok(Json(response))
}
