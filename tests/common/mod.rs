//! Helpers compartidos por los tests de integración
//!
//! `VersionedMemoryStore` imita el system versioning de MariaDB: cada UPDATE
//! cierra la versión actual y abre una nueva con el campo modificado.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tower::ServiceExt;

use flight_history_explorer::models::{
    FieldValue, HistoryWindow, NewRoute, RouteField, RouteId, RouteUpdate, RouteVersion,
};
use flight_history_explorer::repositories::RouteStore;
use flight_history_explorer::routes::create_app;
use flight_history_explorer::state::{AppState, SchemaStatus};
use flight_history_explorer::utils::errors::{AppError, AppResult};

/// Fin de intervalo de la versión actual, como lo guarda MariaDB
pub fn open_ended() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2038, 1, 19, 3, 14, 7).unwrap() + Duration::microseconds(999_999)
}

#[derive(Default)]
struct Table {
    next_id: RouteId,
    versions: Vec<RouteVersion>,
    last_tick: Option<DateTime<Utc>>,
}

impl Table {
    // Reloj estrictamente creciente para que los intervalos no colapsen
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(ts);
        ts
    }
}

#[derive(Default)]
pub struct VersionedMemoryStore {
    table: Mutex<Table>,
    pub schema_inits: AtomicUsize,
    pub calls: AtomicUsize,
}

impl VersionedMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn engine_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Todas las versiones guardadas de una ruta, sin filtrar por tiempo
    pub fn all_versions(&self, route_id: RouteId) -> Vec<RouteVersion> {
        let table = self.table.lock().unwrap();
        table
            .versions
            .iter()
            .filter(|v| v.route_id == route_id)
            .cloned()
            .collect()
    }

    pub fn current(&self, route_id: RouteId) -> Option<RouteVersion> {
        self.all_versions(route_id).into_iter().find(|v| v.is_current())
    }
}

#[async_trait]
impl RouteStore for VersionedMemoryStore {
    async fn ensure_schema(&self) -> AppResult<()> {
        self.schema_inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn insert(&self, route: NewRoute) -> AppResult<RouteId> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        let route_id = table.next_id;
        let row_start = table.tick();

        table.versions.push(RouteVersion {
            route_id,
            airline: Some(route.airline),
            airline_id: Some(route.airline_id),
            source_airport: Some(route.source_airport),
            source_airport_id: None,
            destination_airport: Some(route.destination_airport),
            destination_airport_id: None,
            codeshare: None,
            stops: None,
            equipment: None,
            row_start,
            row_end: open_ended(),
        });
        Ok(route_id)
    }

    async fn update(&self, update: RouteUpdate) -> AppResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut table = self.table.lock().unwrap();
        let now = table.tick();

        let Some(current) = table
            .versions
            .iter_mut()
            .find(|v| v.route_id == update.route_id && v.is_current())
        else {
            return Ok(0);
        };

        let mut next = current.clone();
        current.row_end = now;
        next.row_start = now;
        match (update.field, update.value) {
            (RouteField::AirlineId, FieldValue::Integer(n)) => next.airline_id = Some(n),
            (RouteField::SourceAirport, FieldValue::Code(code)) => next.source_airport = Some(code),
            (RouteField::DestinationAirport, FieldValue::Code(code)) => {
                next.destination_airport = Some(code)
            }
            (field, value) => {
                return Err(AppError::Internal(format!("{} cannot hold {}", field, value)))
            }
        }
        table.versions.push(next);
        Ok(1)
    }

    async fn history(&self, route_id: RouteId, window: HistoryWindow) -> AppResult<Vec<RouteVersion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut versions: Vec<_> = self
            .all_versions(route_id)
            .into_iter()
            .filter(|v| window.overlaps(v.row_start, v.row_end))
            .collect();
        versions.sort_by_key(|v| v.row_start);
        Ok(versions)
    }
}

/// Store que siempre falla como lo haría el motor
pub struct FailingStore {
    pub connection_down: bool,
}

impl FailingStore {
    fn fail<T>(&self) -> AppResult<T> {
        if self.connection_down {
            Err(AppError::Connection(sqlx::Error::Protocol(
                "Can't connect to server on 'db' (111)".to_string(),
            )))
        } else {
            Err(AppError::Database(sqlx::Error::Protocol(
                "Table 'openflights.routes' doesn't exist".to_string(),
            )))
        }
    }
}

#[async_trait]
impl RouteStore for FailingStore {
    async fn ensure_schema(&self) -> AppResult<()> {
        self.fail()
    }

    async fn insert(&self, _route: NewRoute) -> AppResult<RouteId> {
        self.fail()
    }

    async fn update(&self, _update: RouteUpdate) -> AppResult<u64> {
        self.fail()
    }

    async fn history(&self, _route_id: RouteId, _window: HistoryWindow) -> AppResult<Vec<RouteVersion>> {
        self.fail()
    }
}

pub fn test_app(store: Arc<dyn RouteStore>) -> Router {
    create_app(AppState::new(store, SchemaStatus::Ready))
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read(app.clone().oneshot(request).await.unwrap()).await
}

async fn read(response: Response<Body>) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
