//! YieldMax Market Data Crate
//!
//! Fetches quotes for a fixed set of YieldMax ETFs from two providers and
//! reduces them to one canonical record shape.
//!
//! # Overview
//!
//! - Two providers: Yahoo Finance (primary) and Alpha Vantage (secondary)
//! - Ranked candidate endpoints per request (local relay, public mirrors, direct)
//! - Concurrent per-ticker fetches with per-ticker failure isolation
//! - Two-tier fallback per fetch cycle
//!
//! # Architecture
//!
//! ```text
//!                          +----------------------------+
//!                          | ProviderFallbackController |  (primary -> secondary)
//!                          +----------------------------+
//!                                       |
//!                                       v
//!                          +----------------------------+
//!                          |     BatchOrchestrator      |  (one task, all tickers)
//!                          +----------------------------+
//!                                       |
//!                         per ticker    v
//!   +---------------+      +----------------------------+      +----------------+
//!   | QuoteProvider | ---> |        QuoteFetcher        | ---> | JsonTransport  |
//!   | (candidates)  |      |  (ordered, time-bounded)   |      | (reqwest)      |
//!   +---------------+      +----------------------------+      +----------------+
//!           |                           |
//!           v                           v
//!   +---------------+      +----------------------------+
//!   |  normalize()  | ---> |      CanonicalQuote        |
//!   +---------------+      +----------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CanonicalQuote`] - Provider-independent quote record
//! - [`BatchResult`] - One provider's results, aligned with the ticker list
//! - [`PublishedState`] - What a fetch cycle hands to the presentation layer
//! - [`ProviderId`] - Provider identifier ("YAHOO", "ALPHA_VANTAGE")

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;
pub mod registry;

pub use models::{
    default_tickers, normalize_tickers, BatchResult, CanonicalQuote, ProviderId,
    PublishedState, Recommendation, DEFAULT_TICKERS, FAMILY_EXPENSE_RATIO,
};

pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::QuoteProvider;

pub use fetcher::{HttpTransport, JsonTransport, QuoteFetcher, DEFAULT_ATTEMPT_TIMEOUT};

pub use registry::{
    BatchOrchestrator, CycleFailure, CycleOutcome, CycleReport, FallbackState,
    ProviderFallbackController, QuoteValidator, ValidatorConfig, CONNECTION_ERROR_LABEL,
};

pub use errors::{MarketDataError, RetryClass};
