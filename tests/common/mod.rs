#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use vehicle_maintenance::dto::{CreateMaintenanceRequest, RecordCompletionRequest};
use vehicle_maintenance::models::{ControlBy, MaintenanceHistoryEntry, MaintenanceItem, Vehicle};
use vehicle_maintenance::repositories::{InMemoryMaintenanceStore, MaintenanceStore, MaintenanceTx};

pub struct Fixture {
    pub store: Arc<InMemoryMaintenanceStore>,
    pub owner_id: Uuid,
    pub vehicle: Vehicle,
}

pub async fn setup(current_km: i64) -> Fixture {
    let store = Arc::new(InMemoryMaintenanceStore::new());
    let owner_id = Uuid::new_v4();
    let vehicle = Vehicle::new(owner_id, current_km);
    store.insert_vehicle(vehicle.clone()).await;

    Fixture {
        store,
        owner_id,
        vehicle,
    }
}

impl Fixture {
    pub fn dyn_store(&self) -> Arc<dyn MaintenanceStore> {
        self.store.clone()
    }

    pub async fn add_vehicle(&self, owner_id: Uuid, current_km: i64) -> Vehicle {
        let vehicle = Vehicle::new(owner_id, current_km);
        self.store.insert_vehicle(vehicle.clone()).await;
        vehicle
    }

    pub async fn vehicle_km(&self, vehicle_id: Uuid) -> i64 {
        let mut tx = self.store.begin().await.unwrap();
        tx.get_vehicle(self.owner_id, vehicle_id)
            .await
            .unwrap()
            .expect("vehicle exists")
            .current_km
    }

    pub async fn stored_item(&self, id: Uuid) -> Option<MaintenanceItem> {
        let mut tx = self.store.begin().await.unwrap();
        tx.get_maintenance(self.owner_id, id).await.unwrap()
    }

    pub async fn history_of(&self, maintenance_id: Uuid) -> Vec<MaintenanceHistoryEntry> {
        let mut tx = self.store.begin().await.unwrap();
        tx.list_history(self.owner_id, maintenance_id).await.unwrap()
    }
}

pub fn km_request(vehicle_id: Uuid, interval: i64, last_km: Option<i64>) -> CreateMaintenanceRequest {
    CreateMaintenanceRequest {
        vehicle_id,
        item_name: "Troca de óleo".to_string(),
        control_by: ControlBy::Km,
        control_value: interval,
        last_changed_km: last_km,
        next_change_km: None,
        last_changed_date: None,
        next_change_date: None,
        cost: Some(Decimal::new(25000, 2)),
        status: None,
    }
}

pub fn time_request(
    vehicle_id: Uuid,
    days: i64,
    last_date: Option<DateTime<Utc>>,
) -> CreateMaintenanceRequest {
    CreateMaintenanceRequest {
        vehicle_id,
        item_name: "Fluido de freio".to_string(),
        control_by: ControlBy::Time,
        control_value: days,
        last_changed_km: None,
        next_change_km: None,
        last_changed_date: last_date,
        next_change_date: None,
        cost: None,
        status: None,
    }
}

pub fn completion(maintenance_id: Uuid, informed_km: i64) -> RecordCompletionRequest {
    RecordCompletionRequest {
        maintenance_id,
        paid_price: Decimal::new(18990, 2),
        informed_km,
        mechanic_shop_name: Some("Oficina Central".to_string()),
        observation: None,
    }
}
