use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::MaintenanceController;
use crate::dto::{
    ApiResponse, CreateMaintenanceRequest, ListMaintenancesQuery, MaintenanceResponse,
    UpdateMaintenanceRequest,
};
use crate::middleware::AuthenticatedOwner;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_maintenances).post(create_maintenance))
        .route(
            "/:id",
            get(get_maintenance)
                .patch(update_maintenance)
                .delete(delete_maintenance),
        )
}

async fn create_maintenance(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceResponse>>), AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.create(owner.owner_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_maintenances(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Query(query): Query<ListMaintenancesQuery>,
) -> Result<Json<ApiResponse<Vec<MaintenanceResponse>>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.list_by_vehicle(owner.owner_id, query.vehicle_id).await?;
    Ok(Json(response))
}

async fn get_maintenance(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.get_by_id(owner.owner_id, id).await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.update(owner.owner_id, id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    owner: AuthenticatedOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.delete(owner.owner_id, id).await?;
    Ok(Json(response))
}
