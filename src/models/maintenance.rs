//! Modelo de Maintenance
//!
//! Un ítem de mantenimiento se controla por distancia (KM) o por tiempo
//! (TIME). El modo de control y sus campos viven juntos en [`Schedule`]:
//! cambiar de modo reemplaza la variante completa, por lo que el par de
//! campos del modo anterior desaparece en una sola asignación.
//!
//! En la base de datos el esquema es plano (`last_changed_km`,
//! `next_change_date`, ...); [`MaintenanceRow`] hace la traducción.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::services::schedule_calculator;
use crate::utils::errors::{validation_error, AppResult};

/// Tipo de control - mapea al ENUM maintenance_control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_control", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlBy {
    Km,
    Time,
}

/// Estado del ítem - mapea al ENUM maintenance_status
///
/// Este servicio solo escribe `Pending` y `Ok`; `Warning` y `Expired` los
/// asigna un evaluador periódico externo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "maintenance_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MaintenanceStatus {
    #[default]
    Pending,
    Ok,
    Warning,
    Expired,
}

/// Valores crudos de un calendario antes de derivar la próxima fecha/km.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleInput {
    pub control_value: i64,
    pub last_km: Option<i64>,
    pub next_km: Option<i64>,
    pub last_date: Option<DateTime<Utc>>,
    pub next_date: Option<DateTime<Utc>>,
}

/// Calendario de un ítem: exactamente un modo de control a la vez.
#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    Km {
        interval_km: i64,
        last_km: Option<i64>,
        next_km: Option<i64>,
    },
    Time {
        interval_days: i64,
        last_date: Option<DateTime<Utc>>,
        next_date: Option<DateTime<Utc>>,
    },
}

impl Schedule {
    /// Construir el calendario para un modo. Si hay línea base, el próximo
    /// vencimiento calculado reemplaza al que haya enviado el cliente; si no
    /// la hay, se conserva el valor enviado (o queda vacío). Un vencimiento
    /// fuera de rango es un error de validación.
    pub fn build(control_by: ControlBy, input: ScheduleInput) -> AppResult<Self> {
        let out_of_range =
            || validation_error("control_value", "El próximo vencimiento queda fuera de rango");

        let schedule = match control_by {
            ControlBy::Km => Schedule::Km {
                interval_km: input.control_value,
                last_km: input.last_km,
                next_km: match input.last_km {
                    Some(_) => Some(
                        schedule_calculator::next_due_km(input.last_km, input.control_value)
                            .ok_or_else(out_of_range)?,
                    ),
                    None => input.next_km,
                },
            },
            ControlBy::Time => Schedule::Time {
                interval_days: input.control_value,
                last_date: input.last_date,
                next_date: match input.last_date {
                    Some(_) => Some(
                        schedule_calculator::next_due_date(input.last_date, input.control_value)
                            .ok_or_else(out_of_range)?,
                    ),
                    None => input.next_date,
                },
            },
        };
        Ok(schedule)
    }

    /// Reconstruir desde columnas persistidas, sin recalcular nada.
    pub fn from_columns(
        control_by: ControlBy,
        control_value: i64,
        last_km: Option<i64>,
        next_km: Option<i64>,
        last_date: Option<DateTime<Utc>>,
        next_date: Option<DateTime<Utc>>,
    ) -> Self {
        match control_by {
            ControlBy::Km => Schedule::Km {
                interval_km: control_value,
                last_km,
                next_km,
            },
            ControlBy::Time => Schedule::Time {
                interval_days: control_value,
                last_date,
                next_date,
            },
        }
    }

    /// Valores actuales del modo activo, útiles para fusionar una actualización parcial.
    pub fn to_input(&self) -> ScheduleInput {
        ScheduleInput {
            control_value: self.control_value(),
            last_km: self.last_changed_km(),
            next_km: self.next_change_km(),
            last_date: self.last_changed_date(),
            next_date: self.next_change_date(),
        }
    }

    /// Calendario tras un servicio realizado: la línea base pasa a ser el
    /// km informado (KM) o el instante `now` (TIME).
    pub fn completed(&self, informed_km: i64, now: DateTime<Utc>) -> Option<Self> {
        match *self {
            Schedule::Km { interval_km, .. } => Some(Schedule::Km {
                interval_km,
                last_km: Some(informed_km),
                next_km: Some(schedule_calculator::next_due_km(Some(informed_km), interval_km)?),
            }),
            Schedule::Time { interval_days, .. } => Some(Schedule::Time {
                interval_days,
                last_date: Some(now),
                next_date: Some(schedule_calculator::next_due_date(Some(now), interval_days)?),
            }),
        }
    }

    pub fn control_by(&self) -> ControlBy {
        match self {
            Schedule::Km { .. } => ControlBy::Km,
            Schedule::Time { .. } => ControlBy::Time,
        }
    }

    pub fn control_value(&self) -> i64 {
        match *self {
            Schedule::Km { interval_km, .. } => interval_km,
            Schedule::Time { interval_days, .. } => interval_days,
        }
    }

    pub fn last_changed_km(&self) -> Option<i64> {
        match *self {
            Schedule::Km { last_km, .. } => last_km,
            Schedule::Time { .. } => None,
        }
    }

    pub fn next_change_km(&self) -> Option<i64> {
        match *self {
            Schedule::Km { next_km, .. } => next_km,
            Schedule::Time { .. } => None,
        }
    }

    pub fn last_changed_date(&self) -> Option<DateTime<Utc>> {
        match *self {
            Schedule::Time { last_date, .. } => last_date,
            Schedule::Km { .. } => None,
        }
    }

    pub fn next_change_date(&self) -> Option<DateTime<Utc>> {
        match *self {
            Schedule::Time { next_date, .. } => next_date,
            Schedule::Km { .. } => None,
        }
    }
}

/// Ítem de mantenimiento del dominio
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub vehicle_id: Uuid,
    pub item_name: String,
    pub schedule: Schedule,
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un ítem nuevo
#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub owner_id: Uuid,
    pub vehicle_id: Uuid,
    pub item_name: String,
    pub schedule: Schedule,
    pub cost: Option<Decimal>,
    pub status: MaintenanceStatus,
}

/// Fila de la tabla maintenances
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceRow {
    pub id: Uuid,
    pub owner_id: Uuid,
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

impl From<MaintenanceRow> for MaintenanceItem {
    fn from(row: MaintenanceRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            vehicle_id: row.vehicle_id,
            item_name: row.item_name,
            schedule: Schedule::from_columns(
                row.control_by,
                row.control_value,
                row.last_changed_km,
                row.next_change_km,
                row.last_changed_date,
                row.next_change_date,
            ),
            cost: row.cost,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
