//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del núcleo de mantenimiento
//! y su mapeo al schema PostgreSQL.

pub mod maintenance;
pub mod maintenance_history;
pub mod vehicle;

pub use maintenance::{
    ControlBy, MaintenanceItem, MaintenanceRow, MaintenanceStatus, NewMaintenance, Schedule,
    ScheduleInput,
};
pub use maintenance_history::{MaintenanceHistoryEntry, NewHistoryEntry};
pub use vehicle::Vehicle;
