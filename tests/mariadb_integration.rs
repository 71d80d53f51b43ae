//! Tests contra un MariaDB real (>= 10.3, system versioning).
//!
//! Necesitan DB_HOST, DB_PORT, DB_USER y DB_PASSWORD con acceso a la base de
//! datos `openflights`:
//!
//!     cargo test --test mariadb_integration -- --ignored

use chrono::{Duration, Utc};

use flight_history_explorer::config::DatabaseConfig;
use flight_history_explorer::database::{schema, DatabaseConnection};
use flight_history_explorer::models::{FieldValue, HistoryWindow, NewRoute, RouteField, RouteUpdate};
use flight_history_explorer::repositories::{MariaDbRouteRepository, RouteStore};

fn repository() -> (DatabaseConnection, MariaDbRouteRepository) {
    dotenvy::dotenv().ok();
    let config = DatabaseConfig::from_env().expect("DB_* variables must be set for MariaDB tests");
    let db = DatabaseConnection::new(&config);
    (db.clone(), MariaDbRouteRepository::new(db))
}

#[tokio::test]
#[ignore]
async fn test_schema_init_twice_is_harmless() {
    let (db, repo) = repository();
    schema::ensure_routes_table(&db).await.unwrap();
    repo.ensure_schema().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_add_update_history_against_engine() {
    let (_, repo) = repository();
    repo.ensure_schema().await.unwrap();

    let route_id = repo
        .insert(NewRoute::normalized("ba", 125, "lhr", "jfk"))
        .await
        .unwrap();
    let other_id = repo
        .insert(NewRoute::normalized("ba", 125, "lhr", "jfk"))
        .await
        .unwrap();
    assert_ne!(route_id, other_id);

    // Separar las versiones en el tiempo
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let matched = repo
        .update(RouteUpdate {
            route_id,
            field: RouteField::SourceAirport,
            value: FieldValue::Code("LGW".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(matched, 1);

    let today = Utc::now().date_naive();
    let window = HistoryWindow::from_dates(today - Duration::days(1), today + Duration::days(1)).unwrap();
    let versions = repo.history(route_id, window).await.unwrap();

    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].source_airport.as_deref(), Some("LHR"));
    assert_eq!(versions[1].source_airport.as_deref(), Some("LGW"));
    assert_eq!(versions[0].row_end, versions[1].row_start);
    assert!(versions[1].is_current());
    for version in &versions {
        assert_eq!(version.route_id, route_id);
        assert_eq!(version.airline.as_deref(), Some("BA"));
        assert_eq!(version.airline_id, Some(125));
        assert_eq!(version.destination_airport.as_deref(), Some("JFK"));
    }
}

#[tokio::test]
#[ignore]
async fn test_history_outside_range_is_empty() {
    let (_, repo) = repository();
    repo.ensure_schema().await.unwrap();
    let route_id = repo
        .insert(NewRoute::normalized("AF", 137, "CDG", "JFK"))
        .await
        .unwrap();

    let old = chrono::NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
    let window = HistoryWindow::from_dates(old, old).unwrap();
    assert!(repo.history(route_id, window).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_route_matches_nothing() {
    let (_, repo) = repository();
    repo.ensure_schema().await.unwrap();
    let matched = repo
        .update(RouteUpdate {
            route_id: i32::MAX,
            field: RouteField::AirlineId,
            value: FieldValue::Integer(1),
        })
        .await
        .unwrap();
    assert_eq!(matched, 0);
}
