//! Módulo de base de datos
//! 
//! Maneja las sesiones con MariaDB y la creación del esquema versionado

pub mod connection;
pub mod schema;

pub use connection::DatabaseConnection;
