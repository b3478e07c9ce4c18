//! Utilidades de validación
//!
//! Funciones helper para validar campos de entrada y convertir
//! marcas de tiempo entre el formato de intercambio (RFC 3339) y el
//! formato almacenado.

use chrono::{DateTime, NaiveDateTime};
use validator::ValidationError;

/// Formato con el que se devuelven las horas de inicio
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validar y convertir string RFC 3339 a fecha-hora sin zona.
///
/// Se conserva la hora de reloj escrita en la entrada; el desplazamiento
/// horario se descarta sin convertir a UTC.
pub fn validate_datetime(value: &str) -> Result<NaiveDateTime, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Formatear una hora de inicio como `YYYY-MM-DD HH:MM:SS`
pub fn format_start_time(value: &NaiveDateTime) -> String {
    value.format(START_TIME_FORMAT).to_string()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}
