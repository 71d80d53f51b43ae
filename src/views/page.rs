use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::dto::route_dto::{AddRouteForm, HistoryForm, Tab, UpdateRouteForm};
use crate::models::{RouteField, RouteVersion};
use crate::state::SchemaStatus;
use crate::utils::errors::{AppError, Severity};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 1200px; padding: 0 1rem; }
nav a { display: inline-block; padding: .5rem 1rem; border-bottom: 2px solid transparent; text-decoration: none; color: #333; }
nav a.active { border-color: #c0392b; font-weight: 600; }
form { display: grid; gap: .75rem; max-width: 420px; margin-top: 1rem; }
label { display: grid; gap: .25rem; }
.dates { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.flash { padding: .75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.success { background: #e8f5e9; color: #1b5e20; }
.warning { background: #fff8e1; color: #8d6e00; }
.error { background: #ffebee; color: #b71c1c; }
table { border-collapse: collapse; margin-top: 1rem; font-size: .9rem; }
th, td { border: 1px solid #ddd; padding: .35rem .6rem; text-align: left; }
tr.current { background: #f1f8e9; }
"#;

/// Mensaje mostrado tras una acción
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub severity: Severity,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn from_error(error: &AppError) -> Self {
        Self {
            severity: error.severity(),
            message: error.user_message(),
        }
    }
}

/// Todo lo que necesita la página para renderizarse
#[derive(Debug, Default)]
pub struct PageContext<'a> {
    pub tab: Tab,
    pub schema: Option<&'a SchemaStatus>,
    pub flash: Option<Flash>,
    pub add_form: AddRouteForm,
    pub update_form: UpdateRouteForm,
    pub history_form: HistoryForm,
    pub history: Vec<RouteVersion>,
}

pub fn render_page(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Flight History Explorer Powered By MariaDB</title>\n");
    let _ = write!(html, "<style>{}</style>\n</head>\n<body>\n", STYLE);
    html.push_str("<h1>✈️ Flight History Explorer</h1>\n");
    html.push_str("<p>Add, update, and track changes to flight routes over time.</p>\n");

    match ctx.schema {
        Some(SchemaStatus::Ready) => push_flash(
            &mut html,
            &Flash::success("Table 'routes' exists or has been created successfully!"),
        ),
        Some(SchemaStatus::Failed(message)) => push_flash(
            &mut html,
            &Flash {
                severity: Severity::Error,
                message: format!("Error creating table: {}", message),
            },
        ),
        None => {}
    }

    html.push_str("<nav>\n");
    for (tab, label, query) in [
        (Tab::Add, "Add Route", "add"),
        (Tab::Update, "Update Route", "update"),
        (Tab::History, "View History", "history"),
    ] {
        let class = if tab == ctx.tab { " class=\"active\"" } else { "" };
        let _ = writeln!(html, "<a href=\"/?tab={}\"{}>{}</a>", query, class, label);
    }
    html.push_str("</nav>\n<main>\n");

    match ctx.tab {
        Tab::Add => render_add(&mut html, &ctx.add_form),
        Tab::Update => render_update(&mut html, &ctx.update_form),
        Tab::History => render_history_form(&mut html, &ctx.history_form),
    }

    if let Some(flash) = &ctx.flash {
        push_flash(&mut html, flash);
    }

    if ctx.tab == Tab::History && !ctx.history.is_empty() {
        render_history_table(&mut html, &ctx.history);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_add(html: &mut String, form: &AddRouteForm) {
    html.push_str("<h2>Add a New Route</h2>\n<form method=\"post\" action=\"/routes/add\">\n");
    text_input(html, "Airline Code:", "airline", &form.airline);
    let airline_id = if form.airline_id.is_empty() { "1" } else { &form.airline_id };
    number_input(html, "Airline ID:", "airline_id", airline_id);
    text_input(html, "Source Airport Code:", "source_airport", &form.source_airport);
    text_input(html, "Destination Airport Code:", "destination_airport", &form.destination_airport);
    html.push_str("<button type=\"submit\">Add Route</button>\n</form>\n");
}

fn render_update(html: &mut String, form: &UpdateRouteForm) {
    html.push_str("<h2>Update Existing Route</h2>\n<form method=\"post\" action=\"/routes/update\">\n");
    let route_id = if form.route_id.is_empty() { "1" } else { &form.route_id };
    number_input(html, "Route ID to Update:", "route_id", route_id);

    html.push_str("<label>Select Field to Update:\n<select name=\"field\">\n");
    for field in RouteField::ALL {
        let selected = if form.field == field.column() { " selected" } else { "" };
        let _ = writeln!(html, "<option value=\"{0}\"{1}>{0}</option>", field.column(), selected);
    }
    html.push_str("</select>\n</label>\n");

    text_input(html, "New Value:", "value", &form.value);
    html.push_str("<button type=\"submit\">Update Route</button>\n</form>\n");
}

fn render_history_form(html: &mut String, form: &HistoryForm) {
    html.push_str("<h2>View Flight History</h2>\n<form method=\"get\" action=\"/routes/history\">\n");
    let route_id = if form.route_id.is_empty() { "1" } else { &form.route_id };
    number_input(html, "Route ID:", "route_id", route_id);
    html.push_str("<div class=\"dates\">\n");
    let _ = writeln!(
        html,
        "<label>Start Date:<input type=\"date\" name=\"start_date\" value=\"{}\"></label>",
        escape_html(&form.start_date)
    );
    let _ = writeln!(
        html,
        "<label>End Date:<input type=\"date\" name=\"end_date\" value=\"{}\"></label>",
        escape_html(&form.end_date)
    );
    html.push_str("</div>\n<button type=\"submit\">Show History</button>\n</form>\n");
}

fn render_history_table(html: &mut String, versions: &[RouteVersion]) {
    html.push_str("<table>\n<thead><tr>");
    for header in [
        "route_id",
        "Airline",
        "Airline_ID",
        "Source_airport",
        "Source_airport_ID",
        "Destination_airport",
        "Destination_airport_ID",
        "Codeshare",
        "Stops",
        "Equipment",
        "row_start",
        "row_end",
    ] {
        let _ = write!(html, "<th>{}</th>", header);
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for version in versions {
        let class = if version.is_current() { " class=\"current\"" } else { "" };
        let row_end = if version.is_current() {
            format!("{} (current)", format_timestamp(&version.row_end))
        } else {
            format_timestamp(&version.row_end)
        };

        let _ = write!(html, "<tr{}>", class);
        for cell in [
            version.route_id.to_string(),
            opt_text(&version.airline),
            opt_number(version.airline_id),
            opt_text(&version.source_airport),
            opt_number(version.source_airport_id),
            opt_text(&version.destination_airport),
            opt_number(version.destination_airport_id),
            opt_text(&version.codeshare),
            opt_number(version.stops),
            opt_text(&version.equipment),
            format_timestamp(&version.row_start),
            row_end,
        ] {
            let _ = write!(html, "<td>{}</td>", escape_html(&cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_number(value: Option<i32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn text_input(html: &mut String, label: &str, name: &str, value: &str) {
    let _ = writeln!(
        html,
        "<label>{}<input type=\"text\" name=\"{}\" value=\"{}\"></label>",
        label,
        name,
        escape_html(value)
    );
}

fn number_input(html: &mut String, label: &str, name: &str, value: &str) {
    let _ = writeln!(
        html,
        "<label>{}<input type=\"number\" name=\"{}\" min=\"1\" step=\"1\" value=\"{}\"></label>",
        label,
        name,
        escape_html(value)
    );
}

fn push_flash(html: &mut String, flash: &Flash) {
    let class = match flash.severity {
        Severity::Success => "success",
        Severity::Warning => "warning",
        Severity::Error => "error",
    };
    let _ = writeln!(
        html,
        "<div class=\"flash {}\" role=\"status\">{}</div>",
        class,
        escape_html(&flash.message)
    );
}

/// Escapar texto del usuario o del motor antes de insertarlo en el HTML
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
