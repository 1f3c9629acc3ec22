//! HTTP client helpers for tests
//!
//! Thin wrappers around reqwest for calling the server's endpoints.

use super::constants::*;
use std::time::Duration;

/// HTTP client wrapper for making API requests in tests
pub struct TestClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    /// Creates a new test client for the given base URL
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    pub async fn health(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .expect("Health request failed")
    }

    pub async fn submit_customer_notification(
        &self,
        customer_number: i64,
        date: &str,
    ) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/api/notification/{}/{}",
                self.base_url, customer_number, date
            ))
            .send()
            .await
            .expect("Submit customer notification request failed")
    }

    pub async fn submit_all_notifications(&self, date: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/notification/{}", self.base_url, date))
            .send()
            .await
            .expect("Submit all notifications request failed")
    }

    pub async fn get_work_item_status(&self, id: i64) -> reqwest::Response {
        self.client
            .get(format!("{}/api/notification/{}", self.base_url, id))
            .send()
            .await
            .expect("Work item status request failed")
    }

    pub async fn get_customer(&self, number: i64) -> reqwest::Response {
        self.client
            .get(format!("{}/api/customer/{}", self.base_url, number))
            .send()
            .await
            .expect("Get customer request failed")
    }

    pub async fn create_customer(&self, name: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/api/customer/{}", self.base_url, name))
            .send()
            .await
            .expect("Create customer request failed")
    }

    #[allow(dead_code)]
    pub async fn seed_customers(&self, count: usize) -> reqwest::Response {
        self.client
            .post(format!("{}/api/customer/create/{}", self.base_url, count))
            .send()
            .await
            .expect("Seed customers request failed")
    }

    #[allow(dead_code)]
    pub async fn delete_customer(&self, number: i64) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/customer/{}", self.base_url, number))
            .send()
            .await
            .expect("Delete customer request failed")
    }

    #[allow(dead_code)]
    pub async fn get_charge(&self, number: i64) -> reqwest::Response {
        self.client
            .get(format!("{}/api/charge/{}", self.base_url, number))
            .send()
            .await
            .expect("Get charge request failed")
    }

    #[allow(dead_code)]
    pub async fn get_customer_charges(&self, customer_number: i64, date: &str) -> reqwest::Response {
        self.client
            .get(format!(
                "{}/api/charge/all/{}/{}",
                self.base_url, customer_number, date
            ))
            .send()
            .await
            .expect("Get customer charges request failed")
    }

    #[allow(dead_code)]
    pub async fn seed_charges(&self, count: usize, date: &str) -> reqwest::Response {
        self.client
            .post(format!(
                "{}/api/charge/create/{}/{}",
                self.base_url, count, date
            ))
            .send()
            .await
            .expect("Seed charges request failed")
    }

    #[allow(dead_code)]
    pub async fn delete_charge(&self, number: i64) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/charge/{}", self.base_url, number))
            .send()
            .await
            .expect("Delete charge request failed")
    }

    /// Polls the work item status endpoint until the item reports completion,
    /// then returns the elapsed milliseconds from the response.
    ///
    /// Panics if the item does not complete within the work timeout.
    pub async fn wait_for_completion(&self, id: i64) -> u64 {
        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(WORK_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!("Work item {} did not complete within {}ms", id, WORK_TIMEOUT_MS);
            }

            let response = self.get_work_item_status(id).await;
            if response.status().is_success() {
                let body: serde_json::Value =
                    response.json().await.expect("Failed to parse status body");
                return body["elapsed_ms"]
                    .as_u64()
                    .expect("elapsed_ms missing from status body");
            }

            tokio::time::sleep(Duration::from_millis(WORK_POLL_INTERVAL_MS)).await;
        }
    }
}
