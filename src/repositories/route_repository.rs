use async_trait::async_trait;
use tracing::{debug, info};

use super::RouteStore;
use crate::database::{schema, DatabaseConnection};
use crate::models::{FieldValue, HistoryWindow, NewRoute, RouteId, RouteUpdate, RouteVersion};
use crate::utils::errors::{AppError, AppResult};

// Las fechas van como parámetros, nunca interpoladas en el SQL
const SELECT_HISTORY: &str = r#"
SELECT route_id, Airline, Airline_ID, Source_airport, Source_airport_ID,
       Destination_airport, Destination_airport_ID, Codeshare, Stops, Equipment,
       row_start, row_end
FROM routes
FOR SYSTEM_TIME BETWEEN ? AND ?
WHERE route_id = ?
ORDER BY row_start
"#;

const INSERT_ROUTE: &str = r#"
INSERT INTO routes (Airline, Airline_ID, Source_airport, Destination_airport)
VALUES (?, ?, ?, ?)
"#;

pub struct MariaDbRouteRepository {
    db: DatabaseConnection,
}

impl MariaDbRouteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RouteStore for MariaDbRouteRepository {
    async fn ensure_schema(&self) -> AppResult<()> {
        schema::ensure_routes_table(&self.db).await
    }

    async fn insert(&self, route: NewRoute) -> AppResult<RouteId> {
        let last_id = self
            .db
            .run(move |conn| {
                Box::pin(async move {
                    let result = sqlx::query(INSERT_ROUTE)
                        .bind(route.airline)
                        .bind(route.airline_id)
                        .bind(route.source_airport)
                        .bind(route.destination_airport)
                        .execute(conn)
                        .await?;
                    Ok(result.last_insert_id())
                })
            })
            .await?;

        let route_id = RouteId::try_from(last_id)
            .map_err(|_| AppError::Internal(format!("route_id {} out of range", last_id)))?;
        info!("🛫 Ruta creada con route_id {}", route_id);
        Ok(route_id)
    }

    async fn update(&self, update: RouteUpdate) -> AppResult<u64> {
        let RouteUpdate { route_id, field, value } = update;

        let matched = self
            .db
            .run(move |conn| {
                Box::pin(async move {
                    let query = sqlx::query(field.update_statement());
                    let query = match value {
                        FieldValue::Integer(n) => query.bind(n),
                        FieldValue::Code(code) => query.bind(code),
                    };
                    let result = query.bind(route_id).execute(conn).await?;
                    Ok(result.rows_affected())
                })
            })
            .await?;

        debug!("✏️ UPDATE routes.{} route_id {}: {} fila(s)", field, route_id, matched);
        Ok(matched)
    }

    async fn history(&self, route_id: RouteId, window: HistoryWindow) -> AppResult<Vec<RouteVersion>> {
        let versions = self
            .db
            .run(move |conn| {
                Box::pin(async move {
                    sqlx::query_as::<_, RouteVersion>(SELECT_HISTORY)
                        .bind(window.start)
                        .bind(window.end)
                        .bind(route_id)
                        .fetch_all(conn)
                        .await
                })
            })
            .await?;

        debug!(
            "📜 Historial route_id {} [{} .. {}]: {} versión(es)",
            route_id,
            window.start,
            window.end,
            versions.len()
        );
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_binds_every_value() {
        assert!(SELECT_HISTORY.contains("FOR SYSTEM_TIME BETWEEN ? AND ?"));
        assert!(SELECT_HISTORY.contains("WHERE route_id = ?"));
        assert!(!SELECT_HISTORY.contains('\''));
    }

    #[test]
    fn test_insert_writes_four_columns() {
        assert_eq!(INSERT_ROUTE.matches('?').count(), 4);
    }
}
