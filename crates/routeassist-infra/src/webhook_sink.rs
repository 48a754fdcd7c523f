//! Remote interest sink: one JSON POST per submission

use std::time::Duration;

use reqwest::blocking::Client;

use routeassist_domain::model::InterestSubmission;
use routeassist_domain::repository::InterestSink;
use routeassist_types::{Error, Result};

const POST_TIMEOUT: Duration = Duration::from_secs(30);

/// Appends rows to a remote log (e.g. a sheet behind a script endpoint)
pub struct WebhookInterestSink {
    url: String,
    client: Client,
}

impl WebhookInterestSink {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(POST_TIMEOUT)
            .build()
            .map_err(|e| Error::Sink(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl InterestSink for WebhookInterestSink {
    fn describe(&self) -> String {
        format!("webhook {}", self.url)
    }

    fn append(&self, submission: &InterestSubmission) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(submission)
            .send()
            .map_err(|e| Error::Sink(format!("POST {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Sink(format!("POST {} returned HTTP {}", self.url, status)));
        }

        tracing::info!(
            driver_id = %submission.driver_id,
            route_code = %submission.route_code,
            "interest posted to webhook"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use routeassist_domain::model::RouteRecord;

    use crate::test_support::serve_once;

    fn submission() -> InterestSubmission {
        let route = RouteRecord {
            route_code: "A12".to_string(),
            city: "Belém".to_string(),
            neighborhood: "Marco".to_string(),
            vehicle_type: None,
            plate: None,
            dispatch_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 24),
            assigned_driver_id: String::new(),
        };
        InterestSubmission::for_route("D9", &route, Utc.with_ymd_and_hms(2026, 1, 23, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_append_posts_json() {
        let (url, server) = serve_once("200 OK", "ok");
        let sink = WebhookInterestSink::new(url).unwrap();
        sink.append(&submission()).unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /export "));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        assert!(request.contains("\"driver_id\":\"D9\""));
        assert!(request.contains("\"route_code\":\"A12\""));
        assert!(request.contains("\"dispatch_date\":\"2026-01-24\""));
    }

    #[test]
    fn test_error_status_is_sink_error() {
        let (url, server) = serve_once("500 Internal Server Error", "boom");
        let sink = WebhookInterestSink::new(url).unwrap();
        let err = sink.append(&submission()).unwrap_err();
        server.join().unwrap();

        match err {
            Error::Sink(message) => assert!(message.contains("500")),
            other => panic!("expected sink error, got {:?}", other),
        }
    }
}
