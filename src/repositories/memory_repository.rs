//! Almacenamiento en memoria
//!
//! Implementación de [`MaintenanceStore`] para desarrollo local y tests.
//! Las transacciones se serializan con un mutex asíncrono: cada una trabaja
//! sobre una copia de los datos que solo se publica en `commit`.
//! Permite inyectar fallos para comprobar que no quedan escrituras parciales.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::models::{
    MaintenanceHistoryEntry, MaintenanceItem, NewHistoryEntry, NewMaintenance, Vehicle,
};
use crate::repositories::{MaintenanceStore, MaintenanceTx};
use crate::utils::errors::{internal_error, not_found_error, AppResult};

/// Punto de la transacción donde se puede forzar un fallo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    UpdateVehicleKm,
    UpdateMaintenance,
    CreateHistory,
    DeleteHistory,
    DeleteMaintenance,
    Commit,
}

#[derive(Debug, Clone, Default)]
struct MemoryData {
    vehicles: HashMap<Uuid, Vehicle>,
    maintenances: HashMap<Uuid, MaintenanceItem>,
    history: HashMap<Uuid, MaintenanceHistoryEntry>,
}

#[derive(Clone, Default)]
pub struct InMemoryMaintenanceStore {
    data: Arc<AsyncMutex<MemoryData>>,
    fail_points: Arc<Mutex<HashSet<FailPoint>>>,
}

impl InMemoryMaintenanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar un vehículo (el CRUD de vehículos es externo a este servicio)
    pub async fn insert_vehicle(&self, vehicle: Vehicle) {
        let mut data = self.data.lock().await;
        data.vehicles.insert(vehicle.id, vehicle);
    }

    pub fn fail_on(&self, point: FailPoint) {
        if let Ok(mut points) = self.fail_points.lock() {
            points.insert(point);
        }
    }

    pub fn clear_fail_points(&self) {
        if let Ok(mut points) = self.fail_points.lock() {
            points.clear();
        }
    }
}

#[async_trait]
impl MaintenanceStore for InMemoryMaintenanceStore {
    async fn begin(&self) -> AppResult<Box<dyn MaintenanceTx>> {
        let guard = self.data.clone().lock_owned().await;
        let staged = (*guard).clone();
        let fail_points = self
            .fail_points
            .lock()
            .map(|points| points.clone())
            .map_err(|_| internal_error("fail point registry poisoned"))?;

        Ok(Box::new(InMemoryTx {
            guard,
            staged,
            fail_points,
        }))
    }
}

pub struct InMemoryTx {
    guard: OwnedMutexGuard<MemoryData>,
    staged: MemoryData,
    fail_points: HashSet<FailPoint>,
}

impl InMemoryTx {
    fn check(&self, point: FailPoint) -> AppResult<()> {
        if self.fail_points.contains(&point) {
            return Err(internal_error(&format!("injected failure at {:?}", point)));
        }
        Ok(())
    }

    fn owns_maintenance(&self, owner_id: Uuid, maintenance_id: Uuid) -> bool {
        self.staged
            .maintenances
            .get(&maintenance_id)
            .map_or(false, |m| m.owner_id == owner_id)
    }
}

#[async_trait]
impl MaintenanceTx for InMemoryTx {
    async fn get_vehicle(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self
            .staged
            .vehicles
            .get(&id)
            .filter(|v| v.owner_id == owner_id)
            .cloned())
    }

    async fn update_vehicle_km(&mut self, owner_id: Uuid, id: Uuid, km: i64) -> AppResult<()> {
        self.check(FailPoint::UpdateVehicleKm)?;
        let vehicle = self
            .staged
            .vehicles
            .get_mut(&id)
            .filter(|v| v.owner_id == owner_id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        vehicle.current_km = km;
        Ok(())
    }

    async fn get_maintenance(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceItem>> {
        Ok(self
            .staged
            .maintenances
            .get(&id)
            .filter(|m| m.owner_id == owner_id)
            .cloned())
    }

    async fn list_maintenances(&mut self, owner_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<MaintenanceItem>> {
        let mut items: Vec<MaintenanceItem> = self
            .staged
            .maintenances
            .values()
            .filter(|m| m.owner_id == owner_id && m.vehicle_id == vehicle_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn create_maintenance(&mut self, new: &NewMaintenance) -> AppResult<MaintenanceItem> {
        let now = Utc::now();
        let item = MaintenanceItem {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            vehicle_id: new.vehicle_id,
            item_name: new.item_name.clone(),
            schedule: new.schedule.clone(),
            cost: new.cost,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.staged.maintenances.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_maintenance(&mut self, item: &MaintenanceItem) -> AppResult<MaintenanceItem> {
        self.check(FailPoint::UpdateMaintenance)?;
        let stored = self
            .staged
            .maintenances
            .get_mut(&item.id)
            .ok_or_else(|| not_found_error("Maintenance", &item.id.to_string()))?;

        *stored = MaintenanceItem {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..item.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_maintenance(&mut self, id: Uuid) -> AppResult<()> {
        self.check(FailPoint::DeleteMaintenance)?;
        self.staged
            .maintenances
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))
    }

    async fn list_history(&mut self, owner_id: Uuid, maintenance_id: Uuid) -> AppResult<Vec<MaintenanceHistoryEntry>> {
        if !self.owns_maintenance(owner_id, maintenance_id) {
            return Ok(Vec::new());
        }
        let mut entries: Vec<MaintenanceHistoryEntry> = self
            .staged
            .history
            .values()
            .filter(|h| h.maintenance_id == maintenance_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn get_history(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceHistoryEntry>> {
        let entry = self.staged.history.get(&id).cloned();
        Ok(entry.filter(|h| self.owns_maintenance(owner_id, h.maintenance_id)))
    }

    async fn create_history(&mut self, new: &NewHistoryEntry) -> AppResult<MaintenanceHistoryEntry> {
        self.check(FailPoint::CreateHistory)?;
        let entry = MaintenanceHistoryEntry {
            id: Uuid::new_v4(),
            maintenance_id: new.maintenance_id,
            paid_price: new.paid_price,
            informed_km: new.informed_km,
            mechanic_shop_name: new.mechanic_shop_name.clone(),
            observation: new.observation.clone(),
            created_at: new.created_at,
        };
        self.staged.history.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_history(&mut self, entry: &MaintenanceHistoryEntry) -> AppResult<MaintenanceHistoryEntry> {
        let stored = self
            .staged
            .history
            .get_mut(&entry.id)
            .ok_or_else(|| not_found_error("History", &entry.id.to_string()))?;

        *stored = MaintenanceHistoryEntry {
            maintenance_id: stored.maintenance_id,
            created_at: stored.created_at,
            ..entry.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_history(&mut self, maintenance_id: Uuid) -> AppResult<u64> {
        self.check(FailPoint::DeleteHistory)?;
        let before = self.staged.history.len();
        self.staged
            .history
            .retain(|_, h| h.maintenance_id != maintenance_id);
        Ok((before - self.staged.history.len()) as u64)
    }

    async fn delete_history_entry(&mut self, id: Uuid) -> AppResult<()> {
        self.staged
            .history
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found_error("History", &id.to_string()))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.check(FailPoint::Commit)?;
        let InMemoryTx {
            mut guard, staged, ..
        } = *self;
        *guard = staged;
        Ok(())
    }
}
