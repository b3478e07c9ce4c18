//! Backend de plazas de aparcamiento y reservas.
//!
//! Expone un CRUD HTTP/JSON sobre PostgreSQL y mantiene el indicador de
//! ocupación de cada plaza sincronizado con sus reservas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
