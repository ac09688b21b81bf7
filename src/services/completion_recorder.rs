//! Registro de servicios realizados
//!
//! Registrar un servicio toca tres cosas en una sola transacción: el
//! odómetro del vehículo, el calendario del ítem y una fila nueva de
//! historial. Si cualquier paso falla no queda ninguna escritura visible.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::dto::RecordCompletionRequest;
use crate::models::{ControlBy, MaintenanceHistoryEntry, MaintenanceItem, MaintenanceStatus, NewHistoryEntry};
use crate::repositories::MaintenanceStore;
use crate::utils::errors::{internal_error, not_found_error, AppResult};

pub struct CompletionRecorder {
    store: Arc<dyn MaintenanceStore>,
}

impl CompletionRecorder {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn record_completion(
        &self,
        owner_id: Uuid,
        request: RecordCompletionRequest,
    ) -> AppResult<MaintenanceHistoryEntry> {
        request.validate()?;

        let maintenance_id = request.maintenance_id;
        let mut tx = self.store.begin().await?;

        let maintenance = tx
            .get_maintenance(owner_id, maintenance_id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &maintenance_id.to_string()))?;

        let vehicle = tx
            .get_vehicle(owner_id, maintenance.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &maintenance.vehicle_id.to_string()))?;

        let now = Utc::now();

        if maintenance.schedule.control_by() == ControlBy::Km && request.informed_km > vehicle.current_km {
            debug!(
                "🚗 Odómetro del vehículo {}: {} -> {} km",
                vehicle.id, vehicle.current_km, request.informed_km
            );
            tx.update_vehicle_km(owner_id, vehicle.id, request.informed_km)
                .await?;
        }

        let schedule = maintenance
            .schedule
            .completed(request.informed_km, now)
            .ok_or_else(|| internal_error("next due value out of range"))?;

        tx.update_maintenance(&MaintenanceItem {
            schedule,
            status: MaintenanceStatus::Ok,
            ..maintenance
        })
        .await?;

        let entry = tx
            .create_history(&NewHistoryEntry {
                maintenance_id,
                paid_price: request.paid_price,
                informed_km: request.informed_km,
                mechanic_shop_name: request.mechanic_shop_name,
                observation: request.observation,
                created_at: now,
            })
            .await?;

        tx.commit().await?;

        info!(
            "✅ Servicio registrado para maintenance {} ({} km, owner {})",
            maintenance_id, entry.informed_km, owner_id
        );
        Ok(entry)
    }
}
