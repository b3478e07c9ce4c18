use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::dto::reservation_dto::{BookSpotRequest, EditReservationRequest, ReservationResponse};
use crate::dto::ApiResponse;
use crate::models::{NewReservation, ReservationUpdate};
use crate::repositories::ParkingRepository;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_datetime;

pub struct ReservationController {
    repository: Arc<dyn ParkingRepository>,
}

/// Convertir `start_time` antes de tocar el almacenamiento
fn parse_start_time(value: &str) -> Result<NaiveDateTime, AppError> {
    validate_datetime(value).map_err(|_| {
        debug!(start_time = %value, "Invalid start_time format");
        bad_request_error("Invalid start_time format")
    })
}

impl ReservationController {
    pub fn new(repository: Arc<dyn ParkingRepository>) -> Self {
        Self { repository }
    }

    pub async fn book(
        &self,
        request: BookSpotRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let start_time = parse_start_time(&request.start_time)?;

        let reservation = self
            .repository
            .book(NewReservation {
                spot_id: request.spot_id,
                name: request.name,
                car_number: request.car_number,
                start_time,
                duration: request.duration,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            reservation.into(),
            "Parking spot reserved successfully",
        ))
    }

    pub async fn list(&self) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = self.repository.list_reservations().await?;
        Ok(reservations.into_iter().map(ReservationResponse::from).collect())
    }

    pub async fn edit(
        &self,
        request: EditReservationRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let start_time = parse_start_time(&request.start_time)?;

        let reservation = self
            .repository
            .update_reservation(ReservationUpdate {
                id: request.id,
                spot_id: request.spot_id,
                name: request.name,
                car_number: request.car_number,
                start_time,
                duration: request.duration,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            reservation.into(),
            "Reservation updated successfully",
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<ApiResponse<()>, AppError> {
        self.repository.delete_reservation(id).await?;
        Ok(ApiResponse::success_message("Reservation deleted successfully"))
    }
}
