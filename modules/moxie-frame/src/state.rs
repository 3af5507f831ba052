use serde::{Deserialize, Serialize};
use tracing::warn;

use farscore_client::ProfileRecord;
use moxie_client::EarningsRecord;
use moxie_frame_common::FrameError;

use crate::aggregate::Aggregate;
use crate::identifier::AccountIdentifier;

/// Frame state handed back to the client and returned on the next action.
///
/// Holds the last resolved fid plus whatever records were obtained for it, so a
/// follow-up action for the same account can skip the fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarriedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earnings: Option<EarningsRecord>,
}

impl CarriedState {
    pub fn decode(raw: &str) -> Result<Self, FrameError> {
        serde_json::from_str(raw).map_err(|e| FrameError::InvalidState(e.to_string()))
    }

    /// Decode state from an untrusted packet. Blank or undecodable state is dropped.
    pub fn decode_lenient(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
        match Self::decode(raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(error = %e, "Discarding carried state");
                None
            }
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// State to carry forward after handling a request.
    pub fn next(id: Option<&AccountIdentifier>, aggregate: &Aggregate) -> Self {
        // A carried profile gates off the next fetch; after an earnings
        // failure the next turn has to retry.
        let profile = match aggregate.earnings.failure() {
            Some(_) => None,
            None => aggregate.profile.success().cloned(),
        };
        Self {
            last_fid: id.map(|id| id.as_str().to_string()),
            profile,
            earnings: aggregate.earnings.success().cloned(),
        }
    }
}
