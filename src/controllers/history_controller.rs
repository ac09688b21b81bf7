use uuid::Uuid;

use crate::dto::{ApiResponse, HistoryDetailsResponse, RecordCompletionRequest, UpdateHistoryRequest};
use crate::models::MaintenanceHistoryEntry;
use crate::services::{CompletionRecorder, HistoryService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct HistoryController {
    recorder: CompletionRecorder,
    history: HistoryService,
}

impl HistoryController {
    pub fn new(state: &AppState) -> Self {
        Self {
            recorder: state.completion_recorder(),
            history: state.history_service(),
        }
    }

    pub async fn record(
        &self,
        owner_id: Uuid,
        request: RecordCompletionRequest,
    ) -> Result<ApiResponse<MaintenanceHistoryEntry>, AppError> {
        let entry = self.recorder.record_completion(owner_id, request).await?;

        Ok(ApiResponse::success_with_message(
            entry,
            "Historial creado exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        owner_id: Uuid,
        maintenance_id: Uuid,
    ) -> Result<ApiResponse<Vec<MaintenanceHistoryEntry>>, AppError> {
        let entries = self.history.list(owner_id, maintenance_id).await?;
        let message = if entries.is_empty() {
            "No hay historial registrado para este mantenimiento"
        } else {
            "Historial del mantenimiento encontrado"
        };

        Ok(ApiResponse::success_with_message(entries, message.to_string()))
    }

    pub async fn details(
        &self,
        owner_id: Uuid,
        history_id: Uuid,
    ) -> Result<ApiResponse<HistoryDetailsResponse>, AppError> {
        let (entry, maintenance) = self.history.details(owner_id, history_id).await?;

        Ok(ApiResponse::success(HistoryDetailsResponse {
            entry,
            maintenance: maintenance.into(),
        }))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        history_id: Uuid,
        request: UpdateHistoryRequest,
    ) -> Result<ApiResponse<MaintenanceHistoryEntry>, AppError> {
        let entry = self.history.update(owner_id, history_id, request).await?;

        Ok(ApiResponse::success_with_message(
            entry,
            "Historial actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, owner_id: Uuid, history_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.history.delete(owner_id, history_id).await?;
        Ok(ApiResponse::message("Historial eliminado exitosamente".to_string()))
    }
}
