use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Primer día que propone el formulario de historial
pub const DEFAULT_HISTORY_START: (i32, u32, u32) = (2025, 1, 1);

// Los formularios llegan como texto: la conversión y sus mensajes de error
// son responsabilidad del controlador, no del extractor de axum.

// Formulario "Add Route"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddRouteForm {
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub airline_id: String,
    #[serde(default)]
    pub source_airport: String,
    #[serde(default)]
    pub destination_airport: String,
}

// Formulario "Update Route"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRouteForm {
    #[serde(default)]
    pub route_id: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

// Formulario "View History"
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryForm {
    #[serde(default)]
    pub route_id: String,
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[serde(default = "default_end_date")]
    pub end_date: String,
}

impl Default for HistoryForm {
    fn default() -> Self {
        Self {
            route_id: String::new(),
            start_date: default_start_date(),
            end_date: default_end_date(),
        }
    }
}

fn default_start_date() -> String {
    let (year, month, day) = DEFAULT_HISTORY_START;
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn default_end_date() -> String {
    Utc::now().date_naive().to_string()
}

// Pestaña activa de la página
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Add,
    Update,
    History,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_tab")]
    pub tab: Option<Tab>,
}

// Un valor desconocido en `?tab=` se ignora y la página cae en Add
fn lenient_tab<'de, D>(deserializer: D) -> Result<Option<Tab>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref().map(str::trim) {
        Some("add") => Some(Tab::Add),
        Some("update") => Some(Tab::Update),
        Some("history") => Some(Tab::History),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_form_defaults() {
        let form = HistoryForm::default();
        assert_eq!(form.start_date, "2025-01-01");
        assert_eq!(form.end_date, Utc::now().date_naive().to_string());
        assert!(form.route_id.is_empty());
    }

    #[test]
    fn test_tab_parsing() {
        let query: PageQuery = serde_json::from_str(r#"{"tab":"history"}"#).unwrap();
        assert_eq!(query.tab, Some(Tab::History));
        assert_eq!(Tab::default(), Tab::Add);
    }

    #[test]
    fn test_unknown_tab_is_ignored() {
        let query: PageQuery = serde_json::from_str(r#"{"tab":"bogus"}"#).unwrap();
        assert_eq!(query.tab, None);

        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.tab, None);
    }
}
