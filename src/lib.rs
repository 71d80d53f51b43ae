//! Flight History Explorer
//! 
//! Alta, modificación e historial de rutas aéreas sobre una tabla de MariaDB
//! con system versioning. El motor calcula los intervalos de validez; aquí
//! sólo se emiten cuatro sentencias parametrizadas y se renderizan los
//! formularios.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
pub mod views;
