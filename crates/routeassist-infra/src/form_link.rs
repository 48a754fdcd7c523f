//! Pre-filled form links
//!
//! Drivers confirm interest on an external form; the link carries the route
//! fields so nothing has to be typed by hand.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use routeassist_domain::model::RouteRecord;
use routeassist_domain::service::dates::format_date;
use routeassist_types::{ConfigError, Result};

fn default_answer_text() -> String {
    "Tenho Interesse".to_string()
}

/// Entry ids of the external form, without the `entry.` prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLinkTemplate {
    pub base_url: String,
    pub driver_id_entry: String,
    pub route_entry: String,
    pub city_entry: String,
    pub neighborhood_entry: String,

    /// Interest rows are matched on route code and date, so forms feeding
    /// the interest table need this
    #[serde(default)]
    pub dispatch_date_entry: Option<String>,

    #[serde(default)]
    pub vehicle_type_entry: Option<String>,

    #[serde(default)]
    pub plate_entry: Option<String>,

    #[serde(default)]
    pub answer_entry: Option<String>,

    #[serde(default = "default_answer_text")]
    pub answer_text: String,
}

impl FormLinkTemplate {
    pub fn build_link(&self, driver_id: &str, route: &RouteRecord) -> Result<String> {
        fn entry(id: &str) -> String {
            format!("entry.{}", id)
        }

        let mut params: Vec<(String, String)> = vec![
            ("usp".to_string(), "pp_url".to_string()),
            (entry(&self.driver_id_entry), driver_id.trim().to_string()),
            (entry(&self.route_entry), route.route_code.clone()),
            (entry(&self.city_entry), route.city.clone()),
            (entry(&self.neighborhood_entry), route.neighborhood.clone()),
        ];
        if let Some(id) = &self.dispatch_date_entry {
            params.push((entry(id), format_date(route.dispatch_date)));
        }
        if let (Some(id), Some(value)) = (&self.vehicle_type_entry, &route.vehicle_type) {
            params.push((entry(id), value.clone()));
        }
        if let (Some(id), Some(value)) = (&self.plate_entry, &route.plate) {
            params.push((entry(id), value.clone()));
        }
        if let Some(id) = &self.answer_entry {
            params.push((entry(id), self.answer_text.clone()));
        }

        let url = Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            ConfigError::Invalid(format!("form base URL '{}': {}", self.base_url, e))
        })?;
        Ok(url.to_string())
    }
}
