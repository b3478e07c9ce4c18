//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::ParkingRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn ParkingRepository>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn ParkingRepository>, config: EnvironmentConfig) -> Self {
        Self { repository, config }
    }
}
