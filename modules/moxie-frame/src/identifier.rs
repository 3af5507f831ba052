use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use moxie_frame_common::FrameError;

use crate::state::CarriedState;

/// Query parameter carrying the account identifier on frame URLs.
pub const USER_FID_PARAM: &str = "userfid";

/// Opaque, non-empty key naming an account in the profile and earnings services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    /// Returns `None` for an empty token.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the resolver may look at for one inbound request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Requester fid from an interactive frame message.
    pub message_fid: Option<u64>,
    /// Full request URL, possibly carrying `?userfid=`.
    pub url: Option<String>,
    /// State carried over from the previous frame in this interaction.
    pub prior: Option<CarriedState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierSource {
    Message,
    Url,
    CarriedState,
}

impl IdentifierSource {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierSource::Message => "message",
            IdentifierSource::Url => "url",
            IdentifierSource::CarriedState => "state",
        }
    }
}

impl fmt::Display for IdentifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the account to operate on: message fid, then URL parameter, then carried state.
pub fn resolve(ctx: &RequestContext) -> Option<AccountIdentifier> {
    resolve_with_source(ctx).map(|(id, _)| id)
}

pub fn resolve_with_source(ctx: &RequestContext) -> Option<(AccountIdentifier, IdentifierSource)> {
    // fid 0 is not a real account; treat it like a missing message.
    if let Some(fid) = ctx.message_fid.filter(|fid| *fid != 0) {
        let id = AccountIdentifier(fid.to_string());
        debug!(fid = %id, "Using requester fid");
        return Some((id, IdentifierSource::Message));
    }

    if let Some(url) = ctx.url.as_deref() {
        match fid_from_url(url) {
            Ok(Some(id)) => {
                debug!(fid = %id, "Extracted fid from URL");
                return Some((id, IdentifierSource::Url));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring request URL"),
        }
    }

    let last = ctx
        .prior
        .as_ref()
        .and_then(|state| state.last_fid.clone())
        .and_then(AccountIdentifier::new)?;
    debug!(fid = %last, "Using fid from carried state");
    Some((last, IdentifierSource::CarriedState))
}

/// Read `userfid` from a URL. A missing or empty parameter is `Ok(None)`.
pub fn fid_from_url(url: &str) -> Result<Option<AccountIdentifier>, FrameError> {
    let parsed = Url::parse(url)?;
    Ok(parsed
        .query_pairs()
        .find(|(key, _)| key == USER_FID_PARAM)
        .and_then(|(_, value)| AccountIdentifier::new(value.into_owned())))
}
