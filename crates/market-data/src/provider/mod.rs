//! Quote provider abstractions and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait that both providers implement
//! - Lenient numeric decoding shared by the normalizers
//! - Concrete provider implementations (Yahoo chart API, Alpha Vantage)
//!
//! # Architecture
//!
//! Providers are explicit variants selected by [`ProviderId`](crate::ProviderId).
//! The batch orchestrator pairs each fetched body with the normalizer of the
//! provider that was asked, so no response shape is ever sniffed.

mod numbers;
mod traits;

pub mod alpha_vantage;
pub mod yahoo;

// Re-exports
pub use traits::QuoteProvider;
