use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::parking_spot_controller::ParkingSpotController;
use crate::dto::parking_spot_dto::{CreateParkingSpotRequest, UpdateParkingSpotRequest};
use crate::dto::ApiResponse;
use crate::models::ParkingSpot;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{IdPath, ValidatedJson};

pub fn create_parking_spot_router() -> Router<AppState> {
    Router::new()
        .route("/parking-spots", get(list_parking_spots).post(create_parking_spot))
        .route(
            "/parking-spots/:id",
            put(update_parking_spot).delete(delete_parking_spot),
        )
}

async fn list_parking_spots(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParkingSpot>>, AppError> {
    let controller = ParkingSpotController::new(state.repository.clone());
    let spots = controller.list().await?;
    Ok(Json(spots))
}

async fn create_parking_spot(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateParkingSpotRequest>,
) -> Result<Json<ApiResponse<ParkingSpot>>, AppError> {
    let controller = ParkingSpotController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_parking_spot(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateParkingSpotRequest>,
) -> Result<Json<ApiResponse<ParkingSpot>>, AppError> {
    let controller = ParkingSpotController::new(state.repository.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_parking_spot(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ParkingSpotController::new(state.repository.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
