pub mod error;
pub mod types;

pub use error::{FarscoreError, Result};
pub use types::{FarscoreResponse, ProfileRecord, Social};

use std::time::Duration;

pub struct FarscoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl FarscoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the Farcaster profile for `user_id` and normalize its first social record.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<ProfileRecord> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("userId", user_id)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(FarscoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.bytes().await?;
        let payload: FarscoreResponse = serde_json::from_slice(&body)?;

        let social = payload
            .into_first_social()
            .ok_or(FarscoreError::NoProfileFound)?;
        let record = ProfileRecord::from(social);
        tracing::debug!(user_id, fid = %record.fid, "Fetched Farscore profile");

        Ok(record)
    }
}
