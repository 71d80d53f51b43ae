//! Modelos del sistema
//! 
//! Este módulo contiene los modelos que mapean exactamente a la tabla
//! versionada `routes` de MariaDB.

pub mod route;

pub use route::*;
