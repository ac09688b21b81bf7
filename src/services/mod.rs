//! Services module
//!
//! Este módulo contiene la lógica de negocio del núcleo de mantenimiento.
//! Los servicios reciben el `owner_id` explícito en cada llamada y delegan
//! la persistencia en un [`crate::repositories::MaintenanceStore`].

pub mod completion_recorder;
pub mod history_service;
pub mod maintenance_service;
pub mod schedule_calculator;

pub use completion_recorder::CompletionRecorder;
pub use history_service::HistoryService;
pub use maintenance_service::MaintenanceService;
