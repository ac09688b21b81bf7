pub mod api_response;
pub mod history_dto;
pub mod maintenance_dto;

pub use api_response::ApiResponse;
pub use history_dto::{HistoryDetailsResponse, RecordCompletionRequest, UpdateHistoryRequest};
pub use maintenance_dto::{
    CreateMaintenanceRequest, ListMaintenancesQuery, MaintenanceResponse, UpdateMaintenanceRequest,
};
