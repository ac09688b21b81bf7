//! Modelo de Vehicle
//!
//! El CRUD de vehículos vive fuera de este servicio; aquí solo se lee el
//! vehículo del propietario y se actualiza su odómetro.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle - mapea a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub model: Option<String>,
    pub plate: Option<String>,
    /// Última lectura conocida del odómetro (km). No decrece por convención.
    pub current_km: i64,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(owner_id: Uuid, current_km: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            model: None,
            plate: None,
            current_km,
            created_at: Utc::now(),
        }
    }
}
