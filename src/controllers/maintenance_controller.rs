use uuid::Uuid;

use crate::dto::{ApiResponse, CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest};
use crate::services::MaintenanceService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct MaintenanceController {
    service: MaintenanceService,
}

impl MaintenanceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.maintenance_service(),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        let item = self.service.create(owner_id, request).await?;

        Ok(ApiResponse::success_with_message(
            item.into(),
            "Mantenimiento creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        owner_id: Uuid,
        id: Uuid,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        let item = self.service.get(owner_id, id).await?;
        Ok(ApiResponse::success(item.into()))
    }

    pub async fn list_by_vehicle(
        &self,
        owner_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<Vec<MaintenanceResponse>>, AppError> {
        let items = self.service.list_by_vehicle(owner_id, vehicle_id).await?;
        let message = if items.is_empty() {
            "No hay mantenimientos registrados para este vehículo"
        } else {
            "Mantenimientos del vehículo encontrados"
        };

        Ok(ApiResponse::success_with_message(
            items.into_iter().map(MaintenanceResponse::from).collect(),
            message.to_string(),
        ))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        let item = self.service.update(owner_id, id, request).await?;

        Ok(ApiResponse::success_with_message(
            item.into(),
            "Mantenimiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.service.delete(owner_id, id).await?;
        Ok(ApiResponse::message(
            "Mantenimiento eliminado exitosamente".to_string(),
        ))
    }
}
