use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use farscore_client::FarscoreClient;
use moxie_client::MoxieClient;
use moxie_frame_common::Config;

use crate::aggregate::gather;
use crate::identifier::{resolve_with_source, RequestContext};
use crate::response::{assemble, ImageUrlRenderer, OutboundResponse, ScreenRenderer};
use crate::sources::{EarningsSource, ProfileSource};
use crate::state::CarriedState;
use crate::view::{derive_view, FrameLinks, Screen};

/// Stateless request handler: resolve, aggregate, derive, assemble.
///
/// Holds only shared, read-only collaborators; all per-request data lives on
/// the stack of `handle`.
pub struct FrameHandler {
    profiles: Arc<dyn ProfileSource>,
    earnings: Arc<dyn EarningsSource>,
    renderer: Arc<dyn ScreenRenderer>,
    links: FrameLinks,
}

impl FrameHandler {
    pub fn new(
        profiles: Arc<dyn ProfileSource>,
        earnings: Arc<dyn EarningsSource>,
        renderer: Arc<dyn ScreenRenderer>,
        links: FrameLinks,
    ) -> Self {
        Self {
            profiles,
            earnings,
            renderer,
            links,
        }
    }

    /// Wire the real HTTP clients and image renderer from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let profiles = FarscoreClient::new(&config.farscore_url, config.http_timeout)
            .context("Failed to build Farscore client")?;
        let earnings = MoxieClient::new(&config.moxie_earnings_url, config.http_timeout)
            .context("Failed to build Moxie client")?;

        Ok(Self::new(
            Arc::new(profiles),
            Arc::new(earnings),
            Arc::new(ImageUrlRenderer::from_config(config)),
            FrameLinks::from_config(config),
        ))
    }

    pub fn links(&self) -> &FrameLinks {
        &self.links
    }

    pub async fn handle(&self, ctx: &RequestContext) -> OutboundResponse {
        let resolved = resolve_with_source(ctx);
        let id = resolved.as_ref().map(|(id, _)| id);

        let aggregate = gather(
            self.profiles.as_ref(),
            self.earnings.as_ref(),
            id,
            ctx.prior.as_ref(),
        )
        .await;

        let view = derive_view(id, &aggregate, &self.links);
        let state = CarriedState::next(id, &aggregate);

        info!(
            fid = id.map(|id| id.as_str()).unwrap_or("-"),
            source = resolved.as_ref().map_or("none", |(_, s)| s.as_str()),
            screen = if matches!(view.screen, Screen::Splash) { "splash" } else { "score" },
            reused = aggregate.reused,
            failed = view.error.is_some(),
            "Frame handled"
        );

        assemble(&view, self.renderer.as_ref(), state)
    }
}
