use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Moxie earnings for one account across the three reporting windows.
///
/// Returned as decoded; the only shape requirement is that all three windows
/// are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub today: EarningsWindow,
    pub weekly: EarningsWindow,
    pub lifetime: EarningsWindow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsWindow {
    /// Decimal amount as text, exactly as the API sent it.
    #[serde(default, deserialize_with = "amount_text")]
    pub all_earnings_amount: Option<String>,
}

impl EarningsWindow {
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            all_earnings_amount: Some(amount.into()),
        }
    }

    /// Parsed amount. Missing, unparsable, or non-finite text reads as zero.
    pub fn amount(&self) -> f64 {
        self.all_earnings_amount
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

// The API documents a string but has been seen returning bare numbers.
fn amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
