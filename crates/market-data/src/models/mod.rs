//! Market data models
//!
//! This module contains the core data types of the quote pipeline:
//! - `types` - Provider identity (ProviderId)
//! - `ticker` - The configured ETF family and ticker canonicalization
//! - `quote` - The canonical record (CanonicalQuote)
//! - `batch` - Per-cycle results (BatchResult, PublishedState)
//! - `recommendation` - Hold/Reduce/Replace verdicts

mod batch;
mod quote;
mod recommendation;
mod ticker;
mod types;

pub use batch::{BatchResult, PublishedState};
pub use quote::CanonicalQuote;
pub use recommendation::Recommendation;
pub use ticker::{default_tickers, normalize_tickers, DEFAULT_TICKERS, FAMILY_EXPENSE_RATIO};
pub use types::ProviderId;
