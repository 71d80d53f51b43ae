//! Configuración de base de datos
//! 
//! Este módulo maneja las credenciales de MariaDB. La base de datos destino es
//! fija (`openflights`); host, puerto, usuario y contraseña son obligatorios.

use std::env;
use std::path::PathBuf;

use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};

use super::{parse_port, required, ConfigError};

/// Nombre fijo de la base de datos destino
pub const DATABASE_NAME: &str = "openflights";

/// Configuración de la base de datos
#[derive(Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_ca: Option<PathBuf>,
}

// La contraseña nunca debe aparecer en logs
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("ssl_ca", &self.ssl_ca)
            .finish()
    }
}

impl DatabaseConfig {
    /// Construir la configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración con una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = required(&lookup, "DB_HOST")?;
        let port = parse_port("DB_PORT", &required(&lookup, "DB_PORT")?)?;
        let user = required(&lookup, "DB_USER")?;
        // La contraseña no se recorta: los espacios pueden ser significativos
        let password = lookup("DB_PASSWORD")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DB_PASSWORD"))?;
        let ssl_ca = lookup("DB_SSL_CA")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            user,
            password,
            database: DATABASE_NAME.to_string(),
            ssl_ca,
        })
    }

    /// Opciones de conexión para sqlx
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database);

        match &self.ssl_ca {
            Some(ca) => options.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca(ca),
            None => options,
        }
    }

    /// Descripción de la conexión apta para logs (sin contraseña)
    pub fn describe(&self) -> String {
        format!(
            "mysql://{}:***@{}:{}/{}{}",
            self.user,
            self.host,
            self.port,
            self.database,
            if self.ssl_ca.is_some() { " (ssl: verify_ca)" } else { "" }
        )
    }
}
