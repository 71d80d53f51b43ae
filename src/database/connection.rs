//! Conexión a MariaDB
//! 
//! Cada operación abre su propia sesión, ejecuta una sola sentencia en
//! auto-commit y cierra la sesión, también cuando la sentencia falla. No hay
//! pool ni reintentos.

use futures::future::BoxFuture;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::{debug, error, warn};

use crate::config::DatabaseConfig;
use crate::utils::errors::{AppError, AppResult};

/// Proveedor de sesiones contra la base de datos `openflights`
#[derive(Clone)]
pub struct DatabaseConnection {
    options: MySqlConnectOptions,
    description: String,
}

impl DatabaseConnection {
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            options: config.connect_options(),
            description: config.describe(),
        }
    }

    /// Descripción de la conexión sin contraseña
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Abrir una sesión autenticada
    pub async fn open(&self) -> AppResult<MySqlConnection> {
        debug!("🔗 Abriendo sesión: {}", self.description);
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                error!("❌ Error conectando a {}: {}", self.description, e);
                AppError::Connection(e)
            })
    }

    /// Ejecutar una operación dentro de una sesión propia. La sesión se
    /// cierra siempre, tanto si la operación termina bien como si falla.
    pub async fn run<T, F>(&self, operation: F) -> AppResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut MySqlConnection) -> BoxFuture<'c, Result<T, sqlx::Error>>,
    {
        let mut conn = self.open().await?;
        let result = operation(&mut conn).await;
        release(conn).await;
        result.map_err(AppError::Database)
    }
}

/// Cerrar la sesión; un fallo al cerrar sólo se registra
async fn release(conn: MySqlConnection) {
    match conn.close().await {
        Ok(()) => debug!("🔒 Sesión cerrada"),
        Err(e) => warn!("⚠️ Error cerrando la sesión: {}", e),
    }
}
