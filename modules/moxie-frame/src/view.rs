use serde::Serialize;
use url::form_urlencoded::byte_serialize;

use moxie_client::EarningsWindow;
use moxie_frame_common::Config;

use crate::aggregate::Aggregate;
use crate::format::format_amount;
use crate::identifier::{AccountIdentifier, USER_FID_PARAM};

pub const CHECK_YOURS_LABEL: &str = "Check yours";
pub const SHARE_LABEL: &str = "Share";

/// How a frame client should invoke an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Post back to the frame server at `target`.
    Navigate,
    /// Open `target` outside the frame.
    ExternalLink,
}

impl ActionKind {
    /// Button action keyword in frame meta tags.
    pub fn as_frame_action(self) -> &'static str {
        match self {
            ActionKind::Navigate => "post",
            ActionKind::ExternalLink => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub label: String,
    pub target: String,
    pub kind: ActionKind,
}

/// Render-ready values for the Score screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub username: String,
    pub fid: String,
    pub profile_image_url: String,
    pub social_capital_score: String,
    pub social_capital_rank: String,
    pub is_power_user: bool,
    pub today: String,
    pub weekly: String,
    pub lifetime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Splash,
    Score(ScoreCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub actions: Vec<Action>,
    /// First fetch error for this request. Logged, never rendered.
    pub error: Option<String>,
}

/// Bases for the outbound action links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLinks {
    pub app_url: String,
    pub frames_url: String,
    pub composer_url: String,
    pub share_text: String,
}

impl FrameLinks {
    pub fn from_config(config: &Config) -> Self {
        Self {
            app_url: config.app_url.clone(),
            frames_url: config.frames_url.clone(),
            composer_url: config.composer_url.clone(),
            share_text: config.share_text.clone(),
        }
    }

    /// `<app>?userfid=<id>`, with an empty value when unresolved.
    pub fn check_yours_target(&self, id: Option<&AccountIdentifier>) -> String {
        format!(
            "{}?{USER_FID_PARAM}={}",
            self.app_url,
            encode(id.map(AccountIdentifier::as_str).unwrap_or_default())
        )
    }

    /// Composer link embedding the frame, with `?userfid=` only when resolved.
    pub fn share_target(&self, id: Option<&AccountIdentifier>) -> String {
        let embed_suffix = id
            .map(|id| format!("?{USER_FID_PARAM}={}", encode(id.as_str())))
            .unwrap_or_default();
        format!(
            "{}?text={}&embeds[]={}{embed_suffix}",
            self.composer_url,
            encode(&self.share_text),
            self.frames_url
        )
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Pick the screen and actions for one request.
///
/// Splash when nothing was resolved, nothing was fetched, the earnings fetch
/// failed, or no record was obtained at all. A failed profile fetch alone
/// still renders Score, with placeholder profile fields next to the earnings.
pub fn derive_view(
    id: Option<&AccountIdentifier>,
    aggregate: &Aggregate,
    links: &FrameLinks,
) -> ViewState {
    let mut actions = vec![Action {
        label: CHECK_YOURS_LABEL.to_string(),
        target: links.check_yours_target(id),
        kind: ActionKind::Navigate,
    }];

    let profile = aggregate.profile.success();
    let earnings_failed = aggregate.earnings.failure().is_some();

    let screen = match id {
        Some(id) if aggregate.attempted() && aggregate.has_data() && !earnings_failed => {
            let earnings = aggregate.earnings.success();
            let amount = |window: Option<&EarningsWindow>| {
                format_amount(window.map_or(0.0, EarningsWindow::amount))
            };
            Screen::Score(ScoreCard {
                username: profile.map(|p| p.name.clone()).unwrap_or_default(),
                fid: id.to_string(),
                profile_image_url: profile
                    .map(|p| p.profile_image_url.clone())
                    .unwrap_or_default(),
                social_capital_score: profile
                    .map(|p| p.social_capital_score.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                social_capital_rank: profile
                    .map(|p| p.social_capital_rank.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
                is_power_user: profile.is_some_and(|p| p.is_power_user),
                today: amount(earnings.map(|e| &e.today)),
                weekly: amount(earnings.map(|e| &e.weekly)),
                lifetime: amount(earnings.map(|e| &e.lifetime)),
            })
        }
        _ => Screen::Splash,
    };

    if matches!(screen, Screen::Score(_)) && profile.is_some() {
        actions.push(Action {
            label: SHARE_LABEL.to_string(),
            target: links.share_target(id),
            kind: ActionKind::ExternalLink,
        });
    }

    ViewState {
        screen,
        actions,
        error: aggregate.error.clone(),
    }
}
