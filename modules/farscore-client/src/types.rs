use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Wire types (fields we consume only) ---

/// Top-level Farscore payload.
#[derive(Debug, Clone, Deserialize)]
pub struct FarscoreResponse {
    #[serde(rename = "userData", default)]
    pub user_data: Option<UserData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserData {
    #[serde(rename = "Socials", default)]
    pub socials: Option<Socials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Socials {
    #[serde(rename = "Social", default)]
    pub social: Option<Vec<Social>>,
}

/// One social record. Farscore returns these per platform; the first one wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    pub profile_display_name: Option<String>,
    pub profile_name: Option<String>,
    /// Sometimes a string, sometimes a number.
    pub user_id: Option<Value>,
    pub is_farcaster_power_user: Option<bool>,
    pub social_capital: Option<SocialCapital>,
    pub profile_image: Option<String>,
    pub profile_image_content_value: Option<ProfileImageContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialCapital {
    pub social_capital_score: Option<f64>,
    pub social_capital_rank: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileImageContent {
    pub image: Option<ImageVariants>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVariants {
    pub extra_small: Option<String>,
    pub small: Option<String>,
}

impl FarscoreResponse {
    /// Consume the payload and return its first social record, if any.
    pub fn into_first_social(self) -> Option<Social> {
        self.user_data?.socials?.social?.into_iter().next()
    }
}

// --- Normalized record ---

/// Fallback-applied profile used by the frame. Serialisable so it can ride
/// along in carried frame state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub username: String,
    pub fid: String,
    pub display_name: String,
    pub social_capital_score: String,
    pub social_capital_rank: String,
    pub is_power_user: bool,
    pub profile_image_url: String,
}

impl From<Social> for ProfileRecord {
    fn from(social: Social) -> Self {
        let display_name = non_empty(social.profile_display_name);
        let profile_name = non_empty(social.profile_name);
        let capital = social.social_capital.unwrap_or_default();
        let extra_small = social
            .profile_image_content_value
            .and_then(|c| c.image)
            .and_then(|i| non_empty(i.extra_small));

        Self {
            name: display_name
                .clone()
                .or_else(|| profile_name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            username: profile_name.unwrap_or_else(|| "unknown".to_string()),
            fid: social
                .user_id
                .as_ref()
                .and_then(value_to_text)
                .unwrap_or_else(|| "N/A".to_string()),
            display_name: display_name.unwrap_or_else(|| "N/A".to_string()),
            social_capital_score: capital
                .social_capital_score
                .map(|s| format!("{s:.2}"))
                .unwrap_or_else(|| "N/A".to_string()),
            social_capital_rank: capital
                .social_capital_rank
                .as_ref()
                .and_then(value_to_text)
                .unwrap_or_else(|| "N/A".to_string()),
            is_power_user: social.is_farcaster_power_user.unwrap_or(false),
            profile_image_url: extra_small
                .or_else(|| non_empty(social.profile_image))
                .unwrap_or_default(),
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.is_empty())
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
