use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::MaintenanceResponse;
use crate::models::MaintenanceHistoryEntry;
use crate::utils::validation::validate_money;

// Request para registrar un servicio realizado
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordCompletionRequest {
    pub maintenance_id: Uuid,

    #[validate(custom = "validate_money")]
    pub paid_price: Decimal,

    /// Lectura del odómetro al momento del servicio
    #[validate(range(min = 0, max = 10000000))]
    pub informed_km: i64,

    #[validate(length(max = 120))]
    pub mechanic_shop_name: Option<String>,

    #[validate(length(max = 1000))]
    pub observation: Option<String>,
}

// Request para corregir una entrada del historial
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHistoryRequest {
    #[validate(custom = "validate_money")]
    pub paid_price: Option<Decimal>,

    #[validate(range(min = 0, max = 10000000))]
    pub informed_km: Option<i64>,

    #[validate(length(max = 120))]
    pub mechanic_shop_name: Option<String>,

    #[validate(length(max = 1000))]
    pub observation: Option<String>,
}

// Response de detalle: la entrada junto con su ítem
#[derive(Debug, Serialize)]
pub struct HistoryDetailsResponse {
    #[serde(flatten)]
    pub entry: MaintenanceHistoryEntry,
    pub maintenance: MaintenanceResponse,
}
