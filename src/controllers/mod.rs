//! Controladores
//!
//! Traducen requests ya validados en operaciones del repositorio y
//! construyen las respuestas.

pub mod parking_spot_controller;
pub mod reservation_controller;
