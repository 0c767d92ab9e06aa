use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quote::CanonicalQuote;
use super::types::ProviderId;

/// Outcome of one provider batch, aligned with the requested ticker order.
///
/// `None` entries mark tickers whose fetch or normalization failed.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchResult {
    pub provider: ProviderId,
    pub entries: Vec<Option<CanonicalQuote>>,
}

impl BatchResult {
    pub fn new(provider: ProviderId, entries: Vec<Option<CanonicalQuote>>) -> Self {
        Self { provider, entries }
    }

    /// Number of tickers that produced a record.
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Whether this batch counts as a success (at least one record).
    pub fn has_data(&self) -> bool {
        self.valid_count() > 0
    }

    /// The present records, in ticker order.
    pub fn into_records(self) -> Vec<CanonicalQuote> {
        self.entries.into_iter().flatten().collect()
    }
}

/// State handed to the presentation layer after each fetch cycle.
///
/// Built once per cycle and replaced wholesale; never mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedState {
    pub records: Vec<CanonicalQuote>,
    pub source_label: String,
    pub error_message: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PublishedState {
    /// Placeholder shown before the first cycle completes.
    pub fn loading() -> Self {
        Self {
            records: Vec::new(),
            source_label: String::new(),
            error_message: None,
            updated_at: None,
        }
    }

    /// A successful cycle: records of the winning tier.
    pub fn from_batch(batch: BatchResult) -> Self {
        let source_label = batch.provider.label().to_string();
        Self {
            records: batch.into_records(),
            source_label,
            error_message: None,
            updated_at: Some(Utc::now()),
        }
    }

    /// A failed cycle: no records, a label and a user-facing message.
    pub fn failed(source_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            source_label: source_label.into(),
            error_message: Some(message.into()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.updated_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts_and_flattens_in_order() {
        let batch = BatchResult::new(
            ProviderId::Yahoo,
            vec![
                Some(CanonicalQuote::new("MSTY")),
                None,
                Some(CanonicalQuote::new("NVDY")),
            ],
        );
        assert_eq!(batch.valid_count(), 2);
        assert!(batch.has_data());

        let symbols: Vec<String> = batch.into_records().into_iter().map(|q| q.symbol).collect();
        assert_eq!(symbols, vec!["MSTY", "NVDY"]);
    }

    #[test]
    fn test_empty_batch_has_no_data() {
        let batch = BatchResult::new(ProviderId::AlphaVantage, vec![None, None]);
        assert!(!batch.has_data());
    }

    #[test]
    fn test_published_state_from_batch_uses_provider_label() {
        let batch = BatchResult::new(ProviderId::AlphaVantage, vec![Some(CanonicalQuote::new("ULTY"))]);
        let state = PublishedState::from_batch(batch);
        assert_eq!(state.source_label, "Alpha Vantage API");
        assert_eq!(state.records.len(), 1);
        assert!(state.error_message.is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_published_state_serializes_camel_case() {
        let state = PublishedState::failed("connection error", "boom");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["sourceLabel"], "connection error");
        assert_eq!(json["errorMessage"], "boom");
        assert_eq!(json["records"].as_array().unwrap().len(), 0);
    }
}
