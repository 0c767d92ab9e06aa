use std::fmt;

use serde::{Deserialize, Serialize};

/// Upstream quote provider.
///
/// Each variant pairs with exactly one normalizer; the pipeline never guesses
/// the provider from the shape of a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderId {
    Yahoo,
    AlphaVantage,
}

impl ProviderId {
    /// Stable identifier used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Yahoo => "YAHOO",
            ProviderId::AlphaVantage => "ALPHA_VANTAGE",
        }
    }

    /// Human-readable source label shown next to published records.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderId::Yahoo => "Yahoo Finance API",
            ProviderId::AlphaVantage => "Alpha Vantage API",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_serde_matches_display() {
        let json = serde_json::to_string(&ProviderId::AlphaVantage).unwrap();
        assert_eq!(json, "\"ALPHA_VANTAGE\"");
        assert_eq!(ProviderId::AlphaVantage.to_string(), "ALPHA_VANTAGE");

        let parsed: ProviderId = serde_json::from_str("\"YAHOO\"").unwrap();
        assert_eq!(parsed, ProviderId::Yahoo);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ProviderId::Yahoo.label(), "Yahoo Finance API");
        assert_eq!(ProviderId::AlphaVantage.label(), "Alpha Vantage API");
    }
}
