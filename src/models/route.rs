//! Modelo de Route
//! 
//! Una ruta aérea vive en la tabla `routes`, declarada `WITH SYSTEM VERSIONING`.
//! Cada fila devuelta por una consulta temporal es una versión de la ruta con su
//! intervalo de validez `[row_start, row_end)`, asignado por el motor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::{invalid_input, AppError, AppResult};
use crate::utils::validation::{normalize_code, parse_integer};

/// Identificador sintético asignado por el motor (AUTO_INCREMENT)
pub type RouteId = i32;

/// Máximo TIMESTAMP de MariaDB (2038-01-19 03:14:07 UTC). Las versiones actuales
/// tienen `row_end` igual o mayor a este valor.
const OPEN_ENDED_TIMESTAMP: i64 = i32::MAX as i64;

/// Versión de una ruta - mapea exactamente a las columnas de `routes`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RouteVersion {
    pub route_id: RouteId,
    #[sqlx(rename = "Airline")]
    pub airline: Option<String>,
    #[sqlx(rename = "Airline_ID")]
    pub airline_id: Option<i32>,
    #[sqlx(rename = "Source_airport")]
    pub source_airport: Option<String>,
    #[sqlx(rename = "Source_airport_ID")]
    pub source_airport_id: Option<i32>,
    #[sqlx(rename = "Destination_airport")]
    pub destination_airport: Option<String>,
    #[sqlx(rename = "Destination_airport_ID")]
    pub destination_airport_id: Option<i32>,
    #[sqlx(rename = "Codeshare")]
    pub codeshare: Option<String>,
    #[sqlx(rename = "Stops")]
    pub stops: Option<i32>,
    #[sqlx(rename = "Equipment")]
    pub equipment: Option<String>,
    pub row_start: DateTime<Utc>,
    pub row_end: DateTime<Utc>,
}

impl RouteVersion {
    /// La versión actual tiene el intervalo abierto
    pub fn is_current(&self) -> bool {
        self.row_end.timestamp() >= OPEN_ENDED_TIMESTAMP
    }
}

/// Datos de una nueva ruta, ya normalizados
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewRoute {
    #[validate(
        length(min = 1, max = 10, message = "Airline code must be 1 to 10 characters."),
        regex(path = "crate::utils::validation::CODE_RE", message = "Airline code must contain only letters and digits.")
    )]
    pub airline: String,

    #[validate(range(min = 1, message = "Airline ID must be a positive number."))]
    pub airline_id: i32,

    #[validate(
        length(min = 1, max = 10, message = "Source airport code must be 1 to 10 characters."),
        regex(path = "crate::utils::validation::CODE_RE", message = "Source airport code must contain only letters and digits.")
    )]
    pub source_airport: String,

    #[validate(
        length(min = 1, max = 10, message = "Destination airport code must be 1 to 10 characters."),
        regex(path = "crate::utils::validation::CODE_RE", message = "Destination airport code must contain only letters and digits.")
    )]
    pub destination_airport: String,
}

impl NewRoute {
    /// Construir normalizando los códigos a mayúsculas
    pub fn normalized(airline: &str, airline_id: i32, source: &str, destination: &str) -> Self {
        Self {
            airline: normalize_code(airline),
            airline_id,
            source_airport: normalize_code(source),
            destination_airport: normalize_code(destination),
        }
    }
}

/// Campos que se pueden modificar con una actualización (allow-list cerrada)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteField {
    AirlineId,
    SourceAirport,
    DestinationAirport,
}

impl RouteField {
    pub const ALL: [RouteField; 3] = [
        RouteField::AirlineId,
        RouteField::SourceAirport,
        RouteField::DestinationAirport,
    ];

    /// Nombre de la columna en la tabla
    pub fn column(self) -> &'static str {
        match self {
            RouteField::AirlineId => "Airline_ID",
            RouteField::SourceAirport => "Source_airport",
            RouteField::DestinationAirport => "Destination_airport",
        }
    }

    /// Sentencia fija por variante: el nombre de columna nunca se interpola
    pub fn update_statement(self) -> &'static str {
        match self {
            RouteField::AirlineId => "UPDATE routes SET Airline_ID = ? WHERE route_id = ?",
            RouteField::SourceAirport => "UPDATE routes SET Source_airport = ? WHERE route_id = ?",
            RouteField::DestinationAirport => {
                "UPDATE routes SET Destination_airport = ? WHERE route_id = ?"
            }
        }
    }

    /// Convertir el texto del formulario al tipo de la columna
    pub fn parse_value(self, raw: &str) -> AppResult<FieldValue> {
        match self {
            RouteField::AirlineId => {
                parse_integer(raw, "Airline ID must be a number.").map(FieldValue::Integer)
            }
            RouteField::SourceAirport | RouteField::DestinationAirport => {
                let code = AirportCode {
                    code: normalize_code(raw),
                };
                code.validate()?;
                Ok(FieldValue::Code(code.code))
            }
        }
    }
}

impl fmt::Display for RouteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for RouteField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteField::ALL
            .into_iter()
            .find(|field| field.column() == s.trim())
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Field '{}' cannot be updated. Allowed fields: Airline_ID, Source_airport, Destination_airport.",
                    s.trim()
                ))
            })
    }
}

#[derive(Debug, Validate)]
struct AirportCode {
    #[validate(
        length(min = 1, max = 10, message = "Airport code must be 1 to 10 characters."),
        regex(path = "crate::utils::validation::CODE_RE", message = "Airport code must contain only letters and digits.")
    )]
    code: String,
}

/// Nuevo valor para un campo, ya tipado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(i32),
    Code(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Code(code) => f.write_str(code),
        }
    }
}

/// Actualización de exactamente un campo de la versión actual
#[derive(Debug, Clone, PartialEq)]
pub struct RouteUpdate {
    pub route_id: RouteId,
    pub field: RouteField,
    pub value: FieldValue,
}

/// Ventana temporal de una consulta de historial. Los días son inclusivos:
/// el inicio se amplía a 00:00:00 y el fin a 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl HistoryWindow {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(invalid_input("Start date must not be after end date."));
        }

        let start = start
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Internal("invalid start of day".to_string()))?;
        let end = end
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::Internal("invalid end of day".to_string()))?;

        Ok(Self { start, end })
    }

    /// Verificar si un intervalo de validez se solapa con la ventana.
    ///
    /// Es la regla de `FOR SYSTEM_TIME BETWEEN`: `row_start <= fin` y
    /// `row_end > inicio`. En producción la aplica MariaDB; aquí la usan los
    /// stores en memoria de los tests.
    pub fn overlaps(&self, row_start: DateTime<Utc>, row_end: DateTime<Utc>) -> bool {
        row_start.naive_utc() <= self.end && row_end.naive_utc() > self.start
    }
}
