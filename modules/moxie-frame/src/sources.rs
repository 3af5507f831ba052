// Trait seams for the two data sources.
//
// The orchestrator only sees these traits, so tests swap in the mocks from
// `crate::testing` and never touch the network.

use anyhow::Result;
use async_trait::async_trait;

use farscore_client::{FarscoreClient, ProfileRecord};
use moxie_client::{EarningsRecord, MoxieClient};

use crate::identifier::AccountIdentifier;

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the normalized profile for an account.
    async fn fetch_profile(&self, id: &AccountIdentifier) -> Result<ProfileRecord>;
}

#[async_trait]
pub trait EarningsSource: Send + Sync {
    /// Fetch daily, weekly, and lifetime earnings for an account.
    async fn fetch_earnings(&self, id: &AccountIdentifier) -> Result<EarningsRecord>;
}

#[async_trait]
impl ProfileSource for FarscoreClient {
    async fn fetch_profile(&self, id: &AccountIdentifier) -> Result<ProfileRecord> {
        Ok(FarscoreClient::fetch_profile(self, id.as_str()).await?)
    }
}

#[async_trait]
impl EarningsSource for MoxieClient {
    async fn fetch_earnings(&self, id: &AccountIdentifier) -> Result<EarningsRecord> {
        Ok(MoxieClient::fetch_earnings(self, id.as_str()).await?)
    }
}
