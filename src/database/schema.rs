//! Esquema de la tabla versionada `routes`
//! 
//! La tabla se declara con `PERIOD FOR SYSTEM_TIME` y `WITH SYSTEM VERSIONING`:
//! el motor mantiene todas las versiones anteriores de cada fila.

use tracing::info;

use super::DatabaseConnection;
use crate::utils::errors::AppResult;

pub const CREATE_ROUTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS routes (
    route_id INT AUTO_INCREMENT PRIMARY KEY,
    Airline VARCHAR(10),
    Airline_ID INT,
    Source_airport VARCHAR(10),
    Source_airport_ID INT,
    Destination_airport VARCHAR(10),
    Destination_airport_ID INT,
    Codeshare VARCHAR(10),
    Stops INT,
    Equipment VARCHAR(100),
    row_start TIMESTAMP(6) GENERATED ALWAYS AS ROW START,
    row_end TIMESTAMP(6) GENERATED ALWAYS AS ROW END,
    PERIOD FOR SYSTEM_TIME (row_start, row_end)
) WITH SYSTEM VERSIONING
"#;

/// Crear la tabla si no existe. Es idempotente.
pub async fn ensure_routes_table(db: &DatabaseConnection) -> AppResult<()> {
    db.run(|conn| {
        Box::pin(async move {
            sqlx::query(CREATE_ROUTES_TABLE).execute(conn).await?;
            Ok(())
        })
    })
    .await?;

    info!("✅ Tabla 'routes' lista (system versioning)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_create_if_absent_and_versioned() {
        assert!(CREATE_ROUTES_TABLE.contains("CREATE TABLE IF NOT EXISTS routes"));
        assert!(CREATE_ROUTES_TABLE.contains("PERIOD FOR SYSTEM_TIME (row_start, row_end)"));
        assert!(CREATE_ROUTES_TABLE.trim_end().ends_with("WITH SYSTEM VERSIONING"));
    }
}
