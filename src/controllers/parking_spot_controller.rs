use std::sync::Arc;

use crate::dto::parking_spot_dto::{CreateParkingSpotRequest, UpdateParkingSpotRequest};
use crate::dto::ApiResponse;
use crate::models::{NewParkingSpot, ParkingSpot, ParkingSpotUpdate};
use crate::repositories::ParkingRepository;
use crate::utils::errors::AppError;

pub struct ParkingSpotController {
    repository: Arc<dyn ParkingRepository>,
}

impl ParkingSpotController {
    pub fn new(repository: Arc<dyn ParkingRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        request: CreateParkingSpotRequest,
    ) -> Result<ApiResponse<ParkingSpot>, AppError> {
        let spot = self
            .repository
            .create_spot(NewParkingSpot {
                spot_number: request.spot_number.trim().to_string(),
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            spot,
            "Parking spot created successfully",
        ))
    }

    pub async fn list(&self) -> Result<Vec<ParkingSpot>, AppError> {
        self.repository.list_spots().await
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateParkingSpotRequest,
    ) -> Result<ApiResponse<ParkingSpot>, AppError> {
        let spot = self
            .repository
            .update_spot(
                id,
                ParkingSpotUpdate {
                    spot_number: request.spot_number.trim().to_string(),
                    is_occupied: request.is_occupied,
                },
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            spot,
            "Parking spot updated successfully",
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<ApiResponse<()>, AppError> {
        self.repository.delete_spot(id).await?;
        Ok(ApiResponse::success_message("Parking spot deleted successfully"))
    }
}
