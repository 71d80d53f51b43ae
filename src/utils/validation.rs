//! Utilidades de validación
//! 
//! Este módulo contiene funciones helper para validar y convertir los valores
//! que llegan como texto desde los formularios.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use super::errors::{invalid_input, AppError};

lazy_static! {
    /// Códigos de aerolínea y aeropuerto ya normalizados (IATA/ICAO)
    pub static ref CODE_RE: Regex = Regex::new(r"^[A-Z0-9]+$").unwrap();
}

/// Normalizar un código: sin espacios alrededor y en mayúsculas
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validar que un string no esté vacío
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validar y convertir string a entero
pub fn parse_integer(value: &str, message: &str) -> Result<i32, AppError> {
    value.trim().parse::<i32>().map_err(|_| invalid_input(message))
}

/// Validar y convertir string a entero positivo
pub fn parse_positive_integer(value: &str, message: &str) -> Result<i32, AppError> {
    match parse_integer(value, message)? {
        n if n > 0 => Ok(n),
        _ => Err(invalid_input(message)),
    }
}

/// Validar y convertir string a fecha (YYYY-MM-DD)
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!("{} must be a date in YYYY-MM-DD format.", field))
    })
}
