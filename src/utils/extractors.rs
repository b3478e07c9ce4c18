//! Extractores de axum
//!
//! Envuelven `Json` y `Path` para que los rechazos se devuelvan con el
//! mismo formato JSON que el resto de errores de la API.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use crate::utils::errors::AppError;

/// Cuerpo JSON deserializado y validado con `validator`
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Invalid JSON body");
                AppError::BadRequest("Invalid input".to_string())
            })?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Parámetro de ruta con rechazo en formato JSON
pub struct IdPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for IdPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(reason = %rejection.body_text(), "Invalid path parameter");
                AppError::BadRequest("Invalid id".to_string())
            })?;

        Ok(Self(value))
    }
}
