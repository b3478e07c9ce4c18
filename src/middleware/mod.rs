//! Middleware del sistema
//!
//! Este módulo contiene la configuración de CORS aplicada a todas las rutas.

pub mod cors;

pub use cors::*;
