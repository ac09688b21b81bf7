//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::MaintenanceStore;
use crate::services::{CompletionRecorder, HistoryService, MaintenanceService};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MaintenanceStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn MaintenanceStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }

    pub fn maintenance_service(&self) -> MaintenanceService {
        MaintenanceService::new(self.store.clone())
    }

    pub fn completion_recorder(&self) -> CompletionRecorder {
        CompletionRecorder::new(self.store.clone())
    }

    pub fn history_service(&self) -> HistoryService {
        HistoryService::new(self.store.clone())
    }
}
