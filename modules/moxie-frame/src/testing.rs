// Test mocks for the frame pipeline.
//
// Two mocks matching the two source traits:
// - MockProfileSource (ProfileSource): HashMap-based fid→ProfileRecord
// - MockEarningsSource (EarningsSource): HashMap-based fid→EarningsRecord
//
// Both count calls and can wait on a shared barrier, which only releases when
// the two fetches are in flight at the same time.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Barrier;

use farscore_client::ProfileRecord;
use moxie_client::{EarningsRecord, EarningsWindow};

use crate::identifier::AccountIdentifier;
use crate::sources::{EarningsSource, ProfileSource};

// ---------------------------------------------------------------------------
// MockProfileSource
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered fids.
#[derive(Default)]
pub struct MockProfileSource {
    profiles: HashMap<String, ProfileRecord>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl MockProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fid: &str, profile: ProfileRecord) -> Self {
        self.profiles.insert(fid.to_string(), profile);
        self
    }

    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for MockProfileSource {
    async fn fetch_profile(&self, id: &AccountIdentifier) -> Result<ProfileRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.profiles
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("no profile registered for fid {id}"))
    }
}

// ---------------------------------------------------------------------------
// MockEarningsSource
// ---------------------------------------------------------------------------

/// Returns `Err` for unregistered fids.
#[derive(Default)]
pub struct MockEarningsSource {
    earnings: HashMap<String, EarningsRecord>,
    barrier: Option<Arc<Barrier>>,
    calls: AtomicUsize,
}

impl MockEarningsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fid: &str, earnings: EarningsRecord) -> Self {
        self.earnings.insert(fid.to_string(), earnings);
        self
    }

    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EarningsSource for MockEarningsSource {
    async fn fetch_earnings(&self, id: &AccountIdentifier) -> Result<EarningsRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        self.earnings
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("no earnings registered for fid {id}"))
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// A profile as Farscore would normalize it, with only the name and fid set.
pub fn profile(name: &str, fid: &str) -> ProfileRecord {
    ProfileRecord {
        name: name.to_string(),
        username: name.to_lowercase(),
        fid: fid.to_string(),
        display_name: name.to_string(),
        social_capital_score: "N/A".to_string(),
        social_capital_rank: "N/A".to_string(),
        is_power_user: false,
        profile_image_url: String::new(),
    }
}

pub fn earnings(today: &str, weekly: &str, lifetime: &str) -> EarningsRecord {
    EarningsRecord {
        today: EarningsWindow::new(today),
        weekly: EarningsWindow::new(weekly),
        lifetime: EarningsWindow::new(lifetime),
    }
}
