use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Reservation;
use crate::utils::validation::format_start_time;

// Request para reservar una plaza
#[derive(Debug, Deserialize, Validate)]
pub struct BookSpotRequest {
    pub spot_id: i32,
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub car_number: String,
    /// RFC 3339, p. ej. `2024-01-01T10:00:00Z`
    pub start_time: String,
    pub duration: i32,
}

// Request para editar una reserva (el id viaja en el cuerpo)
#[derive(Debug, Deserialize, Validate)]
pub struct EditReservationRequest {
    pub id: i32,
    pub spot_id: i32,
    #[validate(length(max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub car_number: String,
    pub start_time: String,
    pub duration: i32,
}

// Response de reserva
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: i32,
    pub name: String,
    pub car_number: String,
    pub spot_id: i32,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_time: String,
    pub duration: i32,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            name: reservation.name,
            car_number: reservation.car_number,
            spot_id: reservation.spot_id,
            start_time: format_start_time(&reservation.start_time),
            duration: reservation.duration,
        }
    }
}
