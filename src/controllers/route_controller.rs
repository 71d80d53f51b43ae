use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::dto::route_dto::{AddRouteForm, HistoryForm, UpdateRouteForm};
use crate::models::{HistoryWindow, NewRoute, RouteField, RouteId, RouteUpdate, RouteVersion};
use crate::repositories::RouteStore;
use crate::utils::errors::{missing_input, not_found_error, AppResult};
use crate::utils::validation::{is_blank, parse_date, parse_positive_integer};

pub struct RouteController {
    store: Arc<dyn RouteStore>,
}

impl RouteController {
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self { store }
    }

    /// Alta de una ruta. Devuelve el route_id asignado por el motor.
    pub async fn add(&self, form: AddRouteForm) -> AppResult<RouteId> {
        // Validar campos antes de tocar el motor
        if is_blank(&form.airline) || is_blank(&form.source_airport) || is_blank(&form.destination_airport) {
            return Err(missing_input(
                "Please enter Airline, Source, and Destination airport codes.",
            ));
        }

        let airline_id = parse_positive_integer(&form.airline_id, "Airline ID must be a positive number.")?;
        let route = NewRoute::normalized(&form.airline, airline_id, &form.source_airport, &form.destination_airport);
        route.validate()?;

        info!(
            "➕ Alta de ruta {} ({}) {} → {}",
            route.airline, route.airline_id, route.source_airport, route.destination_airport
        );
        self.store.insert(route).await
    }

    /// Modificar un solo campo de la versión actual de una ruta
    pub async fn update(&self, form: UpdateRouteForm) -> AppResult<RouteUpdate> {
        if is_blank(&form.value) {
            return Err(missing_input("Please enter a new value."));
        }

        let route_id = parse_positive_integer(&form.route_id, "Route ID must be a positive number.")?;
        let field: RouteField = form.field.parse()?;
        let value = field.parse_value(&form.value)?;
        let update = RouteUpdate { route_id, field, value };

        let matched = self.store.update(update.clone()).await?;
        if matched == 0 {
            warn!("⚠️ UPDATE sin filas para route_id {}", route_id);
            return Err(not_found_error("Route", &route_id.to_string()));
        }

        info!("✏️ Ruta {} actualizada: {} → {}", route_id, update.field, update.value);
        Ok(update)
    }

    /// Versiones de una ruta dentro de un rango de días (inclusivo)
    pub async fn history(&self, form: HistoryForm) -> AppResult<Vec<RouteVersion>> {
        let route_id = parse_positive_integer(&form.route_id, "Route ID must be a positive number.")?;
        let start = parse_date(&form.start_date, "Start date")?;
        let end = parse_date(&form.end_date, "End date")?;
        let window = HistoryWindow::from_dates(start, end)?;

        let versions = self.store.history(route_id, window).await?;
        if versions.is_empty() {
            info!("📭 Sin historial para route_id {} entre {} y {}", route_id, start, end);
        }
        Ok(versions)
    }
}
