//! Servicio de ítems de mantenimiento
//!
//! Crea, actualiza, consulta y elimina ítems. Cada operación pública es una
//! única transacción: lectura, validación y escritura ocurren juntas o no
//! ocurren.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CreateMaintenanceRequest, UpdateMaintenanceRequest};
use crate::models::{MaintenanceItem, NewMaintenance, Schedule, ScheduleInput};
use crate::repositories::MaintenanceStore;
use crate::utils::errors::{not_found_error, validation_error, AppResult};

pub struct MaintenanceService {
    store: Arc<dyn MaintenanceStore>,
}

impl MaintenanceService {
    pub fn new(store: Arc<dyn MaintenanceStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> AppResult<MaintenanceItem> {
        request.validate()?;

        let mut tx = self.store.begin().await?;

        tx.get_vehicle(owner_id, request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;

        let schedule = Schedule::build(
            request.control_by,
            ScheduleInput {
                control_value: request.control_value,
                last_km: request.last_changed_km,
                next_km: request.next_change_km,
                last_date: request.last_changed_date,
                next_date: request.next_change_date,
            },
        )?;

        let item = tx
            .create_maintenance(&NewMaintenance {
                owner_id,
                vehicle_id: request.vehicle_id,
                item_name: request.item_name.trim().to_string(),
                schedule,
                cost: request.cost,
                status: request.status.unwrap_or_default(),
            })
            .await?;

        tx.commit().await?;

        info!(
            "🔧 Maintenance {} creado para vehículo {} (owner {})",
            item.id, item.vehicle_id, owner_id
        );
        Ok(item)
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> AppResult<MaintenanceItem> {
        let mut tx = self.store.begin().await?;
        let item = tx
            .get_maintenance(owner_id, id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;
        tx.commit().await?;
        Ok(item)
    }

    pub async fn list_by_vehicle(
        &self,
        owner_id: Uuid,
        vehicle_id: Uuid,
    ) -> AppResult<Vec<MaintenanceItem>> {
        let mut tx = self.store.begin().await?;
        let items = tx.list_maintenances(owner_id, vehicle_id).await?;
        tx.commit().await?;
        Ok(items)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> AppResult<MaintenanceItem> {
        request.validate()?;

        let mut tx = self.store.begin().await?;

        let existing = tx
            .get_maintenance(owner_id, id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;

        let vehicle_id = request.vehicle_id.unwrap_or(existing.vehicle_id);
        let vehicle = tx
            .get_vehicle(owner_id, vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &vehicle_id.to_string()))?;

        let current_mode = existing.schedule.control_by();
        let mode_changed = request
            .control_by
            .map_or(false, |mode| mode != current_mode);

        // Un intervalo en km y uno en días no son intercambiables
        if mode_changed && request.control_value.is_none() {
            warn!(
                "⚠️ Cambio de control {:?} -> {:?} sin control_value en maintenance {}",
                current_mode, request.control_by, id
            );
            return Err(validation_error(
                "control_value",
                "Al cambiar el tipo de control se debe informar un nuevo control_value",
            ));
        }

        if let Some(last_km) = request.last_changed_km {
            if last_km > vehicle.current_km {
                warn!(
                    "⚠️ last_changed_km {} supera el odómetro {} del vehículo {}",
                    last_km, vehicle.current_km, vehicle.id
                );
                return Err(validation_error(
                    "last_changed_km",
                    "El km del último cambio no puede superar el km actual del vehículo",
                ));
            }
        }

        let schedule = if mode_changed {
            let mode = request.control_by.unwrap_or(current_mode);
            Schedule::build(
                mode,
                ScheduleInput {
                    control_value: request.control_value.unwrap_or_default(),
                    last_km: request.last_changed_km,
                    next_km: request.next_change_km,
                    last_date: request.last_changed_date,
                    next_date: request.next_change_date,
                },
            )?
        } else {
            let current = existing.schedule.to_input();
            Schedule::build(
                current_mode,
                ScheduleInput {
                    control_value: request.control_value.unwrap_or(current.control_value),
                    last_km: request.last_changed_km.or(current.last_km),
                    next_km: request.next_change_km.or(current.next_km),
                    last_date: request.last_changed_date.or(current.last_date),
                    next_date: request.next_change_date.or(current.next_date),
                },
            )?
        };

        // El historial pertenece al vehículo; no se traslada a otro
        if vehicle_id != existing.vehicle_id {
            let removed = tx.delete_history(id).await?;
            debug!(
                "🗑️ {} entradas de historial eliminadas al mover maintenance {} al vehículo {}",
                removed, id, vehicle_id
            );
        }

        let updated = MaintenanceItem {
            vehicle_id,
            item_name: request
                .item_name
                .map(|name| name.trim().to_string())
                .unwrap_or(existing.item_name.clone()),
            schedule,
            cost: request.cost.or(existing.cost),
            status: request.status.unwrap_or(existing.status),
            ..existing
        };

        let item = tx.update_maintenance(&updated).await?;
        tx.commit().await?;

        info!("✏️ Maintenance {} actualizado (owner {})", id, owner_id);
        Ok(item)
    }

    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<()> {
        let mut tx = self.store.begin().await?;

        tx.get_maintenance(owner_id, id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;

        let removed = tx.delete_history(id).await?;
        tx.delete_maintenance(id).await?;
        tx.commit().await?;

        info!(
            "🗑️ Maintenance {} eliminado junto con {} entradas de historial (owner {})",
            id, removed, owner_id
        );
        Ok(())
    }
}
