//! HTTP client for the HR server REST API.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::attendance::CheckPayload;
use crate::models::report::{AttendanceSummaryRow, LeaveSummaryRow, PayrollSummaryRow};

use super::types::{ApiMessage, ListQuery, Page, StatusChange};
use super::Resource;

/// Client for the HR server's JSON API.
///
/// Holds one shared `reqwest::Client`; cloning is cheap and every background
/// task gets its own copy. There is no retry and no request cancellation;
/// stale responses are discarded by the store's sequence guard instead.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - API root (e.g. "http://hr.internal:8080/api")
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Join a path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{base}/{path}", base = self.base_url)
    }

    /// Fetch one page of a resource collection.
    pub async fn fetch_list<T: Resource>(&self, query: &ListQuery) -> Result<Page<T>> {
        let response = self
            .client
            .get(self.url(T::PATH))
            .query(&query.to_pairs())
            .send()
            .await?;

        handle_response(response, T::LABEL).await
    }

    /// Fetch a single record by id.
    pub async fn fetch_one<T: Resource>(&self, id: i64) -> Result<T> {
        let response = self
            .client
            .get(self.url(&format!("{path}/{id}", path = T::PATH)))
            .send()
            .await?;

        handle_response(response, T::LABEL).await
    }

    /// Create a record; returns the server's acknowledgement message.
    pub async fn create<T: Resource, P: Serialize + ?Sized>(&self, payload: &P) -> Result<ApiMessage> {
        let response = self.client.post(self.url(T::PATH)).json(payload).send().await?;

        handle_response(response, T::LABEL).await
    }

    /// Update a record; returns the server's acknowledgement message.
    pub async fn update<T: Resource, P: Serialize + ?Sized>(&self, id: i64, payload: &P) -> Result<ApiMessage> {
        let response = self
            .client
            .put(self.url(&format!("{path}/{id}", path = T::PATH)))
            .json(payload)
            .send()
            .await?;

        handle_response(response, T::LABEL).await
    }

    /// Delete a record; returns the server's acknowledgement message.
    pub async fn remove<T: Resource>(&self, id: i64) -> Result<ApiMessage> {
        let response = self
            .client
            .delete(self.url(&format!("{path}/{id}", path = T::PATH)))
            .send()
            .await?;

        handle_response(response, T::LABEL).await
    }

    /// Transition a record's status, optionally carrying a reason.
    pub async fn change_status<T: Resource>(&self, id: i64, change: &StatusChange) -> Result<ApiMessage> {
        let response = self
            .client
            .post(self.url(&format!("{path}/{id}/status", path = T::PATH)))
            .json(change)
            .send()
            .await?;

        handle_response(response, T::LABEL).await
    }

    /// Record a check-in for an employee; the server stamps the time.
    pub async fn check_in(&self, payload: &CheckPayload) -> Result<ApiMessage> {
        let response = self
            .client
            .post(self.url("attendance/check-in"))
            .json(payload)
            .send()
            .await?;

        handle_response(response, "attendance").await
    }

    /// Record a check-out for an employee; the server stamps the time.
    pub async fn check_out(&self, payload: &CheckPayload) -> Result<ApiMessage> {
        let response = self
            .client
            .post(self.url("attendance/check-out"))
            .json(payload)
            .send()
            .await?;

        handle_response(response, "attendance").await
    }

    /// Fetch the aggregated attendance report for a date range.
    pub async fn attendance_report(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<AttendanceSummaryRow>> {
        self.report("reports/attendance", from, to).await
    }

    /// Fetch the aggregated leave report for a date range.
    pub async fn leave_report(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<LeaveSummaryRow>> {
        self.report("reports/leave", from, to).await
    }

    /// Fetch the aggregated payroll report for a date range.
    pub async fn payroll_report(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<PayrollSummaryRow>> {
        self.report("reports/payroll", from, to).await
    }

    async fn report<T: DeserializeOwned>(&self, path: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<T>> {
        let response = self
            .client
            .get(self.url(path))
            .query(&[
                ("from", from.format("%Y-%m-%d").to_string()),
                ("to", to.format("%Y-%m-%d").to_string()),
            ])
            .send()
            .await?;

        handle_response(response, "report").await
    }

    /// Test that the server is reachable and answering.
    pub async fn ping(&self) -> Result<bool> {
        let response = self.client.get(self.url("health")).send().await?;
        Ok(response.status().is_success())
    }
}

/// Check status and decode the body, extracting the server's error message
/// on failure.
async fn handle_response<T: DeserializeOwned>(response: Response, label: &str) -> Result<T> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::not_found(
            extract_message(&body).unwrap_or_else(|| format!("{label} does not exist")),
        ));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::api(failure_message(status, &body)));
    }

    response.json().await.map_err(Into::into)
}

/// Pull the `message` field out of a JSON error body, if there is one.
fn extract_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

/// Server-supplied message when present, generic fallback otherwise.
fn failure_message(status: StatusCode, body: &str) -> String {
    extract_message(body).unwrap_or_else(|| format!("The request failed (HTTP {code})", code = status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/api/", Duration::from_secs(5));
        assert_eq!(client.url("employees"), "http://localhost:8080/api/employees");
    }

    #[test]
    fn test_url_joins_nested_paths() {
        let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(5));
        assert_eq!(
            client.url("leave-requests/7/status"),
            "http://localhost:8080/api/leave-requests/7/status"
        );
    }

    #[test]
    fn test_extract_message_from_json_body() {
        let body = r#"{"message": "Employee code already exists"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Employee code already exists"));
    }

    #[test]
    fn test_extract_message_ignores_garbage() {
        assert_eq!(extract_message("<html>502 Bad Gateway</html>"), None);
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message(r#"{"message": "  "}"#), None);
    }

    #[test]
    fn test_failure_message_falls_back_to_status() {
        let msg = failure_message(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(msg, "The request failed (HTTP 500)");
    }

    #[test]
    fn test_failure_message_prefers_server_text() {
        let msg = failure_message(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "End date must be after start date"}"#,
        );
        assert_eq!(msg, "End date must be after start date");
    }
}
