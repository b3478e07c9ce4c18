//! Repositorios
//!
//! `ParkingRepository` es el contrato que mantiene sincronizado el
//! indicador `is_occupied` de cada plaza con la existencia de reservas.
//! Toda operación que lee y escribe la ocupación se ejecuta de forma
//! atómica en la implementación correspondiente.

pub mod memory_parking_repository;
pub mod pg_parking_repository;

use async_trait::async_trait;

use crate::models::{
    NewParkingSpot, NewReservation, ParkingSpot, ParkingSpotUpdate, Reservation,
    ReservationUpdate,
};
use crate::utils::errors::{AppError, AppResult};

pub use memory_parking_repository::MemoryParkingRepository;
pub use pg_parking_repository::PgParkingRepository;

#[async_trait]
pub trait ParkingRepository: Send + Sync {
    /// Nombre del backend, para logs y health check
    fn backend(&self) -> &'static str;

    /// Comprobar que el almacenamiento responde
    async fn ping(&self) -> AppResult<()>;

    async fn list_spots(&self) -> AppResult<Vec<ParkingSpot>>;

    /// Registrar una plaza libre. Falla con `Conflict` si el número ya existe.
    async fn create_spot(&self, spot: NewParkingSpot) -> AppResult<ParkingSpot>;

    /// Renombrar una plaza. Una ocupación pedida que no coincide con las
    /// reservas existentes falla con `Conflict` sin modificar nada.
    async fn update_spot(&self, id: i32, update: ParkingSpotUpdate) -> AppResult<ParkingSpot>;

    /// Eliminar una plaza sin reservas.
    async fn delete_spot(&self, id: i32) -> AppResult<()>;

    async fn list_reservations(&self) -> AppResult<Vec<Reservation>>;

    /// Reservar una plaza libre y marcarla ocupada.
    async fn book(&self, reservation: NewReservation) -> AppResult<Reservation>;

    /// Sobrescribir una reserva. Si cambia de plaza, la nueva debe estar
    /// libre y la anterior se libera cuando se queda sin reservas.
    async fn update_reservation(&self, update: ReservationUpdate) -> AppResult<Reservation>;

    /// Eliminar una reserva; la plaza se libera si no le quedan reservas.
    async fn delete_reservation(&self, id: i32) -> AppResult<Reservation>;
}

pub(crate) fn spot_occupied() -> AppError {
    AppError::Conflict("Parking spot is already occupied".to_string())
}

pub(crate) fn spot_has_reservations() -> AppError {
    AppError::Conflict("Parking spot has reservations and cannot be deleted".to_string())
}

/// Ocupación pedida en una edición que contradice las reservas existentes
pub(crate) fn occupancy_mismatch(requested: bool) -> AppError {
    if requested {
        AppError::Conflict("Parking spot cannot be marked occupied without a reservation".to_string())
    } else {
        AppError::Conflict("Parking spot has reservations and cannot be marked free".to_string())
    }
}
