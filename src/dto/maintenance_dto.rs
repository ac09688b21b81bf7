use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ControlBy, MaintenanceItem, MaintenanceStatus};
use crate::utils::validation::{validate_money, validate_not_blank};

// Request para crear un ítem de mantenimiento
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 120), custom = "validate_not_blank")]
    pub item_name: String,

    pub control_by: ControlBy,

    /// km o días según `control_by`
    #[validate(range(min = 1, max = 1000000))]
    pub control_value: i64,

    #[validate(range(min = 0, max = 10000000))]
    pub last_changed_km: Option<i64>,

    #[validate(range(min = 0, max = 20000000))]
    pub next_change_km: Option<i64>,

    pub last_changed_date: Option<DateTime<Utc>>,
    pub next_change_date: Option<DateTime<Utc>>,

    #[validate(custom = "validate_money")]
    pub cost: Option<Decimal>,

    pub status: Option<MaintenanceStatus>,
}

// Request para actualizar un ítem (parcial)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub vehicle_id: Option<Uuid>,

    #[validate(length(min = 1, max = 120), custom = "validate_not_blank")]
    pub item_name: Option<String>,

    pub control_by: Option<ControlBy>,

    #[validate(range(min = 1, max = 1000000))]
    pub control_value: Option<i64>,

    #[validate(range(min = 0, max = 10000000))]
    pub last_changed_km: Option<i64>,

    #[validate(range(min = 0, max = 20000000))]
    pub next_change_km: Option<i64>,

    pub last_changed_date: Option<DateTime<Utc>>,
    pub next_change_date: Option<DateTime<Utc>>,

    #[validate(custom = "validate_money")]
    pub cost: Option<Decimal>,

    pub status: Option<MaintenanceStatus>,
}

// Filtro para listar ítems de un vehículo
#[derive(Debug, Deserialize)]
pub struct ListMaintenancesQuery {
    pub vehicle_id: Uuid,
}

// Response de ítem de mantenimiento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub item_name: String,
    pub control_by: ControlBy,
    pub control_value: i64,
    pub last_changed_km: Option<i64>,
    pub next_change_km: Option<i64>,
    pub last_changed_date: Option<DateTime<Utc>>,
    pub next_change_date: Option<DateTime<Utc>>,
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaintenanceItem> for MaintenanceResponse {
    fn from(item: MaintenanceItem) -> Self {
        let schedule = &item.schedule;
        Self {
            id: item.id,
            vehicle_id: item.vehicle_id,
            control_by: schedule.control_by(),
            control_value: schedule.control_value(),
            last_changed_km: schedule.last_changed_km(),
            next_change_km: schedule.next_change_km(),
            last_changed_date: schedule.last_changed_date(),
            next_change_date: schedule.next_change_date(),
            item_name: item.item_name,
            cost: item.cost,
            status: item.status,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
