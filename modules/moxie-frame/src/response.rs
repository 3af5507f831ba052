use serde::Serialize;
use tracing::warn;
use url::Url;

use moxie_frame_common::Config;

use crate::state::CarriedState;
use crate::view::{Action, Screen, ViewState};

pub const FRAME_TITLE: &str = "Moxie Earnings";
pub const FRAME_DESCRIPTION: &str = "Use this frame to check your Moxie Earnings";
pub const IMAGE_ASPECT_RATIO: &str = "1:1";

/// Turns a screen into the image reference a frame client displays.
pub trait ScreenRenderer: Send + Sync {
    fn render(&self, screen: &Screen) -> String;
}

/// Static splash image plus an external image service for the Score screen.
pub struct ImageUrlRenderer {
    splash_image_url: String,
    score_image_url: String,
}

impl ImageUrlRenderer {
    pub fn new(splash_image_url: impl Into<String>, score_image_url: impl Into<String>) -> Self {
        Self {
            splash_image_url: splash_image_url.into(),
            score_image_url: score_image_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.splash_image_url, &config.score_image_url)
    }
}

impl ScreenRenderer for ImageUrlRenderer {
    fn render(&self, screen: &Screen) -> String {
        let card = match screen {
            Screen::Splash => return self.splash_image_url.clone(),
            Screen::Score(card) => card,
        };

        let mut url = match Url::parse(&self.score_image_url) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, url = %self.score_image_url, "Bad score image URL, showing splash");
                return self.splash_image_url.clone();
            }
        };
        url.query_pairs_mut()
            .append_pair("username", &card.username)
            .append_pair("fid", &card.fid)
            .append_pair("image", &card.profile_image_url)
            .append_pair("score", &card.social_capital_score)
            .append_pair("rank", &card.social_capital_rank)
            .append_pair("power", if card.is_power_user { "1" } else { "0" })
            .append_pair("today", &card.today)
            .append_pair("weekly", &card.weekly)
            .append_pair("lifetime", &card.lifetime);
        url.into()
    }
}

/// Everything a frame client needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub screen: Screen,
    pub image: String,
    pub image_aspect_ratio: String,
    pub buttons: Vec<Action>,
    pub title: String,
    pub description: String,
    pub state: CarriedState,
}

/// Package a derived view into the outbound frame.
pub fn assemble(
    view: &ViewState,
    renderer: &dyn ScreenRenderer,
    state: CarriedState,
) -> OutboundResponse {
    OutboundResponse {
        image: renderer.render(&view.screen),
        screen: view.screen.clone(),
        image_aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        buttons: view.actions.clone(),
        title: FRAME_TITLE.to_string(),
        description: FRAME_DESCRIPTION.to_string(),
        state,
    }
}

impl OutboundResponse {
    /// HTML document carrying the frame as `fc:frame` meta tags.
    pub fn to_html(&self) -> String {
        let mut tags = vec![
            meta("og:title", &self.title),
            meta("og:description", &self.description),
            meta("og:image", &self.image),
            meta("fc:frame", "vNext"),
            meta("fc:frame:image", &self.image),
            meta("fc:frame:image:aspect_ratio", &self.image_aspect_ratio),
        ];
        for (i, button) in self.buttons.iter().enumerate() {
            let n = i + 1;
            tags.push(meta(&format!("fc:frame:button:{n}"), &button.label));
            tags.push(meta(
                &format!("fc:frame:button:{n}:action"),
                button.kind.as_frame_action(),
            ));
            tags.push(meta(&format!("fc:frame:button:{n}:target"), &button.target));
        }
        tags.push(meta("fc:frame:state", &self.state.encode()));

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>{}</body>\n</html>\n",
            html_escape(&self.title),
            tags.join("\n"),
            html_escape(&self.description),
        )
    }
}

fn meta(property: &str, content: &str) -> String {
    format!(
        "<meta property=\"{}\" content=\"{}\">",
        html_escape(property),
        html_escape(content)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
