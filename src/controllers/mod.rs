pub mod history_controller;
pub mod maintenance_controller;

pub use history_controller::HistoryController;
pub use maintenance_controller::MaintenanceController;
