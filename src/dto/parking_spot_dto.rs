use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request para crear una plaza
#[derive(Debug, Deserialize, Validate)]
pub struct CreateParkingSpotRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_empty")]
    pub spot_number: String,
}

// Request para actualizar una plaza.
// `is_occupied` se acepta por compatibilidad pero debe coincidir con las reservas.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateParkingSpotRequest {
    #[validate(length(min = 1, max = 50), custom = "validate_not_empty")]
    pub spot_number: String,
    #[serde(default)]
    pub is_occupied: Option<bool>,
}
