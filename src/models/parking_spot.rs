//! Modelo de ParkingSpot
//!
//! Mapea la tabla `parking_spots` y define los comandos que recibe el
//! repositorio para crear o modificar plazas.

use serde::Serialize;
use sqlx::FromRow;

/// Plaza de aparcamiento - mapea exactamente a la tabla parking_spots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ParkingSpot {
    pub id: i32,
    pub spot_number: String,
    pub is_occupied: bool,
}

/// Datos para registrar una plaza nueva (siempre libre)
#[derive(Debug, Clone)]
pub struct NewParkingSpot {
    pub spot_number: String,
}

/// Cambios sobre una plaza existente.
///
/// `is_occupied` solo se acepta si coincide con la existencia de
/// reservas para la plaza; `None` deja la ocupación como está.
#[derive(Debug, Clone)]
pub struct ParkingSpotUpdate {
    pub spot_number: String,
    pub is_occupied: Option<bool>,
}
