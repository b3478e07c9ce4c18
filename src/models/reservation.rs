//! Modelo de Reservation

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Reserva - mapea exactamente a la tabla reservations
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Reservation {
    pub id: i32,
    pub name: String,
    pub car_number: String,
    pub spot_id: i32,
    pub start_time: NaiveDateTime,
    /// Minutos
    pub duration: i32,
}

/// Datos de una reserva nueva, ya validados
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub spot_id: i32,
    pub name: String,
    pub car_number: String,
    pub start_time: NaiveDateTime,
    pub duration: i32,
}

/// Sobrescritura completa de una reserva existente
#[derive(Debug, Clone)]
pub struct ReservationUpdate {
    pub id: i32,
    pub spot_id: i32,
    pub name: String,
    pub car_number: String,
    pub start_time: NaiveDateTime,
    pub duration: i32,
}
