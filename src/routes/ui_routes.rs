use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use tracing::{error, warn};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{AddRouteForm, HistoryForm, PageQuery, Tab, UpdateRouteForm};
use crate::state::AppState;
use crate::utils::errors::{AppError, Severity};
use crate::views::{render_page, Flash, PageContext};

pub fn create_ui_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/routes/add", post(add_route))
        .route("/routes/update", post(update_route))
        .route("/routes/history", get(route_history))
}

type PageResponse = (StatusCode, Html<String>);

fn page(status: StatusCode, ctx: PageContext<'_>) -> PageResponse {
    (status, Html(render_page(&ctx)))
}

/// Convertir un error en mensaje visible; nunca sale de la capa de UI.
/// Los errores del motor se muestran tal cual, precedidos por la operación.
fn report(error: &AppError, operation: &str) -> (StatusCode, Flash) {
    match error.severity() {
        Severity::Warning => warn!("⚠️ {}", error),
        _ => error!("❌ {}: {}", operation, error),
    }

    let mut flash = Flash::from_error(error);
    if matches!(error, AppError::Database(_) | AppError::Connection(_)) {
        flash.message = format!("{}: {}", operation, flash.message);
    }
    (error.status_code(), flash)
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> PageResponse {
    page(
        StatusCode::OK,
        PageContext {
            tab: query.tab.unwrap_or_default(),
            schema: Some(&state.schema),
            ..Default::default()
        },
    )
}

async fn add_route(State(state): State<AppState>, Form(form): Form<AddRouteForm>) -> PageResponse {
    let controller = RouteController::new(state.store.clone());

    let (status, flash) = match controller.add(form.clone()).await {
        Ok(route_id) => (
            StatusCode::OK,
            Flash::success(format!("Route added successfully with route_id {}", route_id)),
        ),
        Err(e) => report(&e, "Failed to add route"),
    };

    page(
        status,
        PageContext {
            tab: Tab::Add,
            schema: Some(&state.schema),
            flash: Some(flash),
            add_form: form,
            ..Default::default()
        },
    )
}

async fn update_route(State(state): State<AppState>, Form(form): Form<UpdateRouteForm>) -> PageResponse {
    let controller = RouteController::new(state.store.clone());

    let (status, flash) = match controller.update(form.clone()).await {
        Ok(update) => (
            StatusCode::OK,
            Flash::success(format!(
                "Route {} updated: {} → {}",
                update.route_id, update.field, update.value
            )),
        ),
        Err(e) => report(&e, "Update failed"),
    };

    page(
        status,
        PageContext {
            tab: Tab::Update,
            schema: Some(&state.schema),
            flash: Some(flash),
            update_form: form,
            ..Default::default()
        },
    )
}

async fn route_history(State(state): State<AppState>, Query(form): Query<HistoryForm>) -> PageResponse {
    let controller = RouteController::new(state.store.clone());

    let (status, flash, history) = match controller.history(form.clone()).await {
        Ok(versions) if versions.is_empty() => (
            StatusCode::OK,
            Flash::warning("No historical records found for this route."),
            versions,
        ),
        Ok(versions) => (
            StatusCode::OK,
            Flash::success(format!("Found {} historical records.", versions.len())),
            versions,
        ),
        Err(e) => {
            let (status, flash) = report(&e, "Failed to fetch history");
            (status, flash, Vec::new())
        }
    };

    page(
        status,
        PageContext {
            tab: Tab::History,
            schema: Some(&state.schema),
            flash: Some(flash),
            history_form: form,
            history,
            ..Default::default()
        },
    )
}
