//! DTOs de la API
//!
//! Formas JSON de entrada y salida de los endpoints.

pub mod api_response;
pub mod parking_spot_dto;
pub mod reservation_dto;

pub use api_response::ApiResponse;
