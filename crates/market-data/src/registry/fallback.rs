//! Two-tier provider fallback.
//!
//! One fetch cycle walks `TryingPrimary -> TryingSecondary -> {Success |
//! TotalFailure}` exactly once. The controller keeps no state between cycles;
//! every call to [`ProviderFallbackController::run_cycle`] starts over.

use std::fmt;
use std::sync::Arc;

use log::{error, info, warn};

use super::BatchOrchestrator;
use crate::errors::RetryClass;
use crate::models::{normalize_tickers, BatchResult, ProviderId, PublishedState};
use crate::provider::QuoteProvider;

/// Source label published when no tier produced data.
pub const CONNECTION_ERROR_LABEL: &str = "connection error";

/// States of one fetch cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackState {
    TryingPrimary,
    TryingSecondary,
    Success(ProviderId),
    TotalFailure,
}

/// Why a cycle published no records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleFailure {
    /// Both tiers ran and neither produced a record.
    NoDataFromEitherSource,
    /// The primary tier is disabled and the secondary produced nothing.
    NoDataFromSecondary(ProviderId),
    /// Something outside the tier logic failed.
    Critical(String),
}

impl CycleFailure {
    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            CycleFailure::NoDataFromEitherSource => "Unable to fetch data from either source. \
                 Check your internet connection or try again later."
                .to_string(),
            CycleFailure::NoDataFromSecondary(provider) => format!(
                "Unable to fetch data from {}. Check the API key or try again later.",
                provider.label()
            ),
            CycleFailure::Critical(_) => {
                "Critical error connecting to the data APIs. Try refreshing.".to_string()
            }
        }
    }
}

impl fmt::Display for CycleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleFailure::NoDataFromEitherSource => f.write_str("no data from either source"),
            CycleFailure::NoDataFromSecondary(provider) => write!(f, "no data from {}", provider),
            CycleFailure::Critical(reason) => write!(f, "critical: {}", reason),
        }
    }
}

/// Terminal result of one cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleOutcome {
    Success(BatchResult),
    Failure(CycleFailure),
}

/// Outcome plus the states the cycle went through, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub transitions: Vec<FallbackState>,
}

impl CycleReport {
    /// Convert into the state handed to the presentation layer.
    pub fn into_published(self) -> PublishedState {
        match self.outcome {
            CycleOutcome::Success(batch) => PublishedState::from_batch(batch),
            CycleOutcome::Failure(failure) => {
                PublishedState::failed(CONNECTION_ERROR_LABEL, failure.user_message())
            }
        }
    }
}

/// Drives the primary/secondary fallback for the configured tickers.
#[derive(Clone)]
pub struct ProviderFallbackController {
    orchestrator: BatchOrchestrator,
    primary: Option<Arc<dyn QuoteProvider>>,
    secondary: Arc<dyn QuoteProvider>,
    tickers: Vec<String>,
}

impl ProviderFallbackController {
    /// Create a controller.
    ///
    /// # Arguments
    ///
    /// * `orchestrator` - Batch runner shared by both tiers
    /// * `primary` - Primary tier; `None` starts cycles at the secondary
    /// * `secondary` - Secondary tier
    /// * `tickers` - Ticker list; canonicalized with [`normalize_tickers`]
    pub fn new(
        orchestrator: BatchOrchestrator,
        primary: Option<Arc<dyn QuoteProvider>>,
        secondary: Arc<dyn QuoteProvider>,
        tickers: Vec<String>,
    ) -> Self {
        Self {
            orchestrator,
            primary,
            secondary,
            tickers: normalize_tickers(tickers),
        }
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Run one full fetch cycle.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut transitions = Vec::with_capacity(3);
        let outcome = self.walk_tiers(&mut transitions).await;

        match &outcome {
            CycleOutcome::Success(batch) => {
                transitions.push(FallbackState::Success(batch.provider));
                info!(
                    "Cycle published {} records from '{}'",
                    batch.valid_count(),
                    batch.provider
                );
            }
            CycleOutcome::Failure(failure) => {
                transitions.push(FallbackState::TotalFailure);
                error!("Cycle failed: {}", failure);
            }
        }

        CycleReport {
            outcome,
            transitions,
        }
    }

    async fn walk_tiers(&self, transitions: &mut Vec<FallbackState>) -> CycleOutcome {
        if let Some(primary) = &self.primary {
            transitions.push(FallbackState::TryingPrimary);
            match self.run_tier(primary.as_ref()).await {
                Ok(batch) => return CycleOutcome::Success(batch),
                Err(TierError::Critical(reason)) => {
                    return CycleOutcome::Failure(CycleFailure::Critical(reason))
                }
                Err(TierError::Empty) => {
                    info!("Primary '{}' had no data, trying secondary", primary.id());
                }
            }
        }

        transitions.push(FallbackState::TryingSecondary);
        match self.run_tier(self.secondary.as_ref()).await {
            Ok(batch) => CycleOutcome::Success(batch),
            Err(TierError::Empty) if self.primary.is_some() => {
                CycleOutcome::Failure(CycleFailure::NoDataFromEitherSource)
            }
            Err(TierError::Empty) => {
                CycleOutcome::Failure(CycleFailure::NoDataFromSecondary(self.secondary.id()))
            }
            Err(TierError::Critical(reason)) => {
                CycleOutcome::Failure(CycleFailure::Critical(reason))
            }
        }
    }

    async fn run_tier(&self, provider: &dyn QuoteProvider) -> Result<BatchResult, TierError> {
        match self.orchestrator.run(provider, &self.tickers).await {
            Ok(batch) => Ok(batch),
            Err(e) if e.retry_class() == RetryClass::NextTier => Err(TierError::Empty),
            Err(e) => {
                warn!("Tier '{}' failed outside fallback rules: {}", provider.id(), e);
                Err(TierError::Critical(e.to_string()))
            }
        }
    }
}

enum TierError {
    Empty,
    Critical(String),
}
