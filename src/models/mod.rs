//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema
//! PostgreSQL y los comandos que consume el repositorio.

pub mod parking_spot;
pub mod reservation;

pub use parking_spot::{NewParkingSpot, ParkingSpot, ParkingSpotUpdate};
pub use reservation::{NewReservation, Reservation, ReservationUpdate};
