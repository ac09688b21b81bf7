//! Modelo de MaintenanceHistory
//!
//! Cada fila representa un servicio realizado. Se permiten correcciones,
//! pero editar una fila nunca recalcula el calendario del ítem.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Entrada de historial - mapea a la tabla maintenance_history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MaintenanceHistoryEntry {
    pub id: Uuid,
    pub maintenance_id: Uuid,
    pub paid_price: Decimal,
    pub informed_km: i64,
    pub mechanic_shop_name: Option<String>,
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar una entrada nueva
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub maintenance_id: Uuid,
    pub paid_price: Decimal,
    pub informed_km: i64,
    pub mechanic_shop_name: Option<String>,
    pub observation: Option<String>,
    pub created_at: DateTime<Utc>,
}
