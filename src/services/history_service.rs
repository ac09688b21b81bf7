use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::UpdateHistoryRequest;
use crate::models::{MaintenanceHistoryEntry, MaintenanceItem};
use crate::repositories::MaintenanceStore;
use crate::utils::errors::{not_found_error, AppResult};

/// Consultas y correcciones del historial. Ninguna de estas operaciones
/// recalcula el calendario del ítem ni toca el odómetro.
pub struct HistoryService {
    store: Arc<dyn MaintenanceStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn list(
        &self,
        owner_id: Uuid,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<MaintenanceHistoryEntry>> {
        let mut tx = self.store.begin().await?;
        let entries = tx.list_history(owner_id, maintenance_id).await?;
        tx.commit().await?;
        Ok(entries)
    }

    pub async fn details(
        &self,
        owner_id: Uuid,
        history_id: Uuid,
    ) -> AppResult<(MaintenanceHistoryEntry, MaintenanceItem)> {
        let mut tx = self.store.begin().await?;

        let entry = tx
            .get_history(owner_id, history_id)
            .await?
            .ok_or_else(|| not_found_error("History", &history_id.to_string()))?;

        let maintenance = tx
            .get_maintenance(owner_id, entry.maintenance_id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &entry.maintenance_id.to_string()))?;

        tx.commit().await?;
        Ok((entry, maintenance))
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        history_id: Uuid,
        request: UpdateHistoryRequest,
    ) -> AppResult<MaintenanceHistoryEntry> {
        request.validate()?;

        let mut tx = self.store.begin().await?;

        let existing = tx
            .get_history(owner_id, history_id)
            .await?
            .ok_or_else(|| not_found_error("History", &history_id.to_string()))?;

        let corrected = MaintenanceHistoryEntry {
            paid_price: request.paid_price.unwrap_or(existing.paid_price),
            informed_km: request.informed_km.unwrap_or(existing.informed_km),
            mechanic_shop_name: request.mechanic_shop_name.or(existing.mechanic_shop_name.clone()),
            observation: request.observation.or(existing.observation.clone()),
            ..existing
        };

        let entry = tx.update_history(&corrected).await?;
        tx.commit().await?;

        info!("✏️ Historial {} corregido (owner {})", history_id, owner_id);
        Ok(entry)
    }

    pub async fn delete(&self, owner_id: Uuid, history_id: Uuid) -> AppResult<()> {
        let mut tx = self.store.begin().await?;

        tx.get_history(owner_id, history_id)
            .await?
            .ok_or_else(|| not_found_error("History", &history_id.to_string()))?;

        tx.delete_history_entry(history_id).await?;
        tx.commit().await?;

        info!("🗑️ Historial {} eliminado (owner {})", history_id, owner_id);
        Ok(())
    }
}
