//! Repositorios
//!
//! Toda operación del núcleo corre dentro de una transacción explícita
//! obtenida con [`MaintenanceStore::begin`]. Si la transacción se descarta
//! sin llamar a [`MaintenanceTx::commit`] (error, `?`, retorno temprano),
//! se hace rollback y nada de lo escrito es visible.

pub mod maintenance_repository;
pub mod memory_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    MaintenanceHistoryEntry, MaintenanceItem, NewHistoryEntry, NewMaintenance, Vehicle,
};
use crate::utils::errors::AppResult;

pub use maintenance_repository::PgMaintenanceStore;
pub use memory_repository::{FailPoint, InMemoryMaintenanceStore};

/// Fuente de transacciones sobre vehículos, ítems e historial
#[async_trait]
pub trait MaintenanceStore: Send + Sync {
    async fn begin(&self) -> AppResult<Box<dyn MaintenanceTx>>;
}

/// Unidad de trabajo atómica. Las lecturas de vehículo e ítem están
/// limitadas al propietario; las escrituras por id asumen que el llamador
/// ya verificó la propiedad dentro de la misma transacción.
#[async_trait]
pub trait MaintenanceTx: Send {
    async fn get_vehicle(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn update_vehicle_km(&mut self, owner_id: Uuid, id: Uuid, km: i64) -> AppResult<()>;

    async fn get_maintenance(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceItem>>;

    async fn list_maintenances(&mut self, owner_id: Uuid, vehicle_id: Uuid) -> AppResult<Vec<MaintenanceItem>>;

    async fn create_maintenance(&mut self, new: &NewMaintenance) -> AppResult<MaintenanceItem>;

    async fn update_maintenance(&mut self, item: &MaintenanceItem) -> AppResult<MaintenanceItem>;

    async fn delete_maintenance(&mut self, id: Uuid) -> AppResult<()>;

    /// Historial de un ítem del propietario, más reciente primero.
    async fn list_history(&mut self, owner_id: Uuid, maintenance_id: Uuid) -> AppResult<Vec<MaintenanceHistoryEntry>>;

    async fn get_history(&mut self, owner_id: Uuid, id: Uuid) -> AppResult<Option<MaintenanceHistoryEntry>>;

    async fn create_history(&mut self, new: &NewHistoryEntry) -> AppResult<MaintenanceHistoryEntry>;

    async fn update_history(&mut self, entry: &MaintenanceHistoryEntry) -> AppResult<MaintenanceHistoryEntry>;

    /// Borra todo el historial de un ítem y devuelve cuántas filas se eliminaron.
    async fn delete_history(&mut self, maintenance_id: Uuid) -> AppResult<u64>;

    async fn delete_history_entry(&mut self, id: Uuid) -> AppResult<()>;

    async fn commit(self: Box<Self>) -> AppResult<()>;
}
