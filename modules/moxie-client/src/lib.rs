pub mod error;
pub mod types;

pub use error::{MoxieError, Result};
pub use types::{EarningsRecord, EarningsWindow};

use std::time::Duration;

pub struct MoxieClient {
    client: reqwest::Client,
    base_url: String,
}

impl MoxieClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch daily, weekly, and lifetime Moxie earnings for `entity_id`.
    pub async fn fetch_earnings(&self, entity_id: &str) -> Result<EarningsRecord> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("entityId", entity_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(MoxieError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.bytes().await?;
        let record: EarningsRecord = serde_json::from_slice(&body)?;
        tracing::debug!(entity_id, "Fetched Moxie earnings");

        Ok(record)
    }
}
