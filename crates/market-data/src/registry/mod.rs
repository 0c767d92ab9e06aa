//! Provider orchestration.
//!
//! This module turns providers into published results:
//! - Batch fan-out of one provider over every ticker
//! - Primary/secondary fallback per fetch cycle
//! - Canonical record validation

mod batch;
mod fallback;
mod validator;

pub use batch::BatchOrchestrator;
pub use fallback::{
    CycleFailure, CycleOutcome, CycleReport, FallbackState, ProviderFallbackController,
    CONNECTION_ERROR_LABEL,
};
pub use validator::{QuoteValidator, ValidatorConfig};
