//! Repositorios
//! 
//! `RouteStore` es la costura entre los controladores y el motor: la
//! implementación real habla con MariaDB, los tests usan una versión en memoria.

pub mod route_repository;

pub use route_repository::MariaDbRouteRepository;

use async_trait::async_trait;

use crate::models::{HistoryWindow, NewRoute, RouteId, RouteUpdate, RouteVersion};
use crate::utils::errors::AppResult;

/// Operaciones sobre la tabla versionada de rutas
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Crear la tabla versionada si no existe (idempotente)
    async fn ensure_schema(&self) -> AppResult<()>;

    /// Insertar una ruta y devolver el identificador asignado por el motor
    async fn insert(&self, route: NewRoute) -> AppResult<RouteId>;

    /// Modificar un campo de la versión actual; devuelve las filas encontradas
    async fn update(&self, update: RouteUpdate) -> AppResult<u64>;

    /// Versiones de la ruta cuyo intervalo se solapa con la ventana, por `row_start`
    async fn history(&self, route_id: RouteId, window: HistoryWindow) -> AppResult<Vec<RouteVersion>>;
}
