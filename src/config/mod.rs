//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de la base de datos (credenciales de
//! MariaDB) y del servidor HTTP. Todo se lee una sola vez al arrancar.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;

use thiserror::Error;

/// Errores de configuración, fatales al arrancar
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be a valid {expected} (got '{value}')")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Leer una variable obligatoria usando la función de búsqueda dada
pub(crate) fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Leer y parsear un puerto
pub(crate) fn parse_port(name: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        expected: "port number",
        value: raw.to_string(),
    })
}
