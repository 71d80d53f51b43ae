//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. No guarda nada entre peticiones: sólo el
//! acceso a la tabla y el resultado de la inicialización del esquema.

use std::sync::Arc;

use crate::repositories::RouteStore;

/// Resultado de la inicialización del esquema al arrancar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    Ready,
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RouteStore>,
    pub schema: SchemaStatus,
}

impl AppState {
    pub fn new(store: Arc<dyn RouteStore>, schema: SchemaStatus) -> Self {
        Self { store, schema }
    }
}
