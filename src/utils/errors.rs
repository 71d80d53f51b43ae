//! Sistema de manejo de errores
//! 
//! Este módulo define todos los tipos de errores de las operaciones sobre
//! rutas y su conversión a mensajes visibles para el usuario y códigos HTTP.

use axum::http::StatusCode;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("{0}")]
    MissingInput(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Nivel del mensaje mostrado en la interfaz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl AppError {
    /// Código HTTP con el que se devuelve la página
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) => StatusCode::OK,
            AppError::InvalidInput(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Los campos vacíos son un aviso, no un error
    pub fn severity(&self) -> Severity {
        match self {
            AppError::MissingInput(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Mensaje para el usuario. Los errores del motor se muestran tal cual.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(errors) => validation_message(errors),
            AppError::Connection(e) | AppError::Database(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Aplanar los errores de validator en un mensaje legible, ordenado por campo
fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de entrada inválida
pub fn invalid_input(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

/// Función helper para crear avisos de campos vacíos
pub fn missing_input(message: &str) -> AppError {
    AppError::MissingInput(message.to_string())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} {} not found", resource, id))
}
