use std::time::Instant;

use tracing::{debug, info, warn};

use farscore_client::ProfileRecord;
use moxie_client::EarningsRecord;

use crate::identifier::AccountIdentifier;
use crate::sources::{EarningsSource, ProfileSource};
use crate::state::CarriedState;

/// Result of one data-source fetch within a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// The fetch was gated off and never attempted.
    NotFetched,
    Success(T),
    Failure(String),
}

impl<T> FetchOutcome<T> {
    pub fn success(&self) -> Option<&T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchOutcome::Failure(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_attempted(&self) -> bool {
        !matches!(self, FetchOutcome::NotFetched)
    }
}

/// Both fetch outcomes for one request, plus the first error seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub profile: FetchOutcome<ProfileRecord>,
    pub earnings: FetchOutcome<EarningsRecord>,
    pub error: Option<String>,
    /// Records came from carried state instead of a fresh fetch.
    pub reused: bool,
}

impl Aggregate {
    pub fn not_fetched() -> Self {
        Self {
            profile: FetchOutcome::NotFetched,
            earnings: FetchOutcome::NotFetched,
            error: None,
            reused: false,
        }
    }

    pub fn attempted(&self) -> bool {
        self.profile.is_attempted() || self.earnings.is_attempted()
    }

    /// At least one record is available for rendering.
    pub fn has_data(&self) -> bool {
        self.profile.success().is_some() || self.earnings.success().is_some()
    }
}

/// Fetch only when there is an identifier and no carried profile for it.
pub fn should_fetch(id: Option<&AccountIdentifier>, prior: Option<&CarriedState>) -> bool {
    let Some(id) = id else {
        return false;
    };
    match prior.and_then(|state| state.profile.as_ref()) {
        None => true,
        Some(profile) => profile.fid != id.as_str(),
    }
}

/// Run both fetches concurrently and wait for both, whatever either returns.
pub async fn aggregate(
    profiles: &dyn ProfileSource,
    earnings: &dyn EarningsSource,
    id: &AccountIdentifier,
) -> Aggregate {
    let (profile_result, earnings_result) = tokio::join!(
        async {
            let result = profiles.fetch_profile(id).await;
            (result, Instant::now())
        },
        async {
            let result = earnings.fetch_earnings(id).await;
            (result, Instant::now())
        },
    );

    let (profile, profile_done) = profile_result;
    let (earnings, earnings_done) = earnings_result;

    let profile = match profile {
        Ok(mut record) => {
            // Gating compares against this fid, so it must be the one we asked for.
            if record.fid != id.as_str() {
                debug!(fid = %id, reported = %record.fid, "Profile fid differs from requested fid");
                record.fid = id.to_string();
            }
            FetchOutcome::Success(record)
        }
        Err(e) => {
            let message = format!("{e:#}");
            warn!(fid = %id, error = %message, "Profile fetch failed");
            FetchOutcome::Failure(message)
        }
    };
    let earnings = match earnings {
        Ok(record) => FetchOutcome::Success(record),
        Err(e) => {
            let message = format!("{e:#}");
            warn!(fid = %id, error = %message, "Earnings fetch failed");
            FetchOutcome::Failure(message)
        }
    };

    // Keep whichever failure settled first.
    let error = match (profile.failure(), earnings.failure()) {
        (Some(_), Some(e)) if earnings_done < profile_done => Some(e.to_string()),
        (Some(p), _) => Some(p.to_string()),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    };

    Aggregate {
        profile,
        earnings,
        error,
        reused: false,
    }
}

/// Apply the gating rule, then either fetch fresh data or reuse the carried records.
pub async fn gather(
    profiles: &dyn ProfileSource,
    earnings: &dyn EarningsSource,
    id: Option<&AccountIdentifier>,
    prior: Option<&CarriedState>,
) -> Aggregate {
    let Some(id) = id else {
        return Aggregate::not_fetched();
    };

    if should_fetch(Some(id), prior) {
        return aggregate(profiles, earnings, id).await;
    }

    info!(fid = %id, "Reusing carried records");
    let prior = prior.cloned().unwrap_or_default();
    Aggregate {
        profile: prior
            .profile
            .map_or(FetchOutcome::NotFetched, FetchOutcome::Success),
        earnings: prior
            .earnings
            .map_or(FetchOutcome::NotFetched, FetchOutcome::Success),
        error: None,
        reused: true,
    }
}
