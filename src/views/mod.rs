//! Vistas HTML
//! 
//! La interfaz es una sola página con tres pestañas (Add, Update, History),
//! renderizada en el servidor.

pub mod page;

pub use page::{render_page, Flash, PageContext};
