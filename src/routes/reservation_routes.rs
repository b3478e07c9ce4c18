use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::reservation_controller::ReservationController;
use crate::dto::reservation_dto::{BookSpotRequest, EditReservationRequest, ReservationResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{IdPath, ValidatedJson};

pub fn create_reservation_router() -> Router<AppState> {
    Router::new()
        .route("/book-spot", post(book_parking_spot))
        .route("/reservation/edit", put(edit_reservation))
        .route("/reservation/delete/:id", delete(delete_reservation))
        .route("/reservations", get(list_reservations))
}

async fn book_parking_spot(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BookSpotRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.repository.clone());
    let response = controller.book(request).await?;
    Ok(Json(response))
}

async fn edit_reservation(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EditReservationRequest>,
) -> Result<Json<ApiResponse<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.repository.clone());
    let response = controller.edit(request).await?;
    Ok(Json(response))
}

async fn delete_reservation(
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReservationController::new(state.repository.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let controller = ReservationController::new(state.repository.clone());
    let reservations = controller.list().await?;
    Ok(Json(reservations))
}
