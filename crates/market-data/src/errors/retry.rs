/// Classification for how far a failure propagates through the pipeline.
///
/// Used by the fetcher, the batch orchestrator and the fallback controller to
/// decide which level recovers from an error.
///
/// # Behavior Summary
///
/// | Class | Recovered by | Effect |
/// |-------|--------------|--------|
/// | `NextCandidate` | Quote fetcher | Try the next candidate endpoint |
/// | `SkipTicker` | Batch orchestrator | Ticker slot becomes absent |
/// | `NextTier` | Fallback controller | Run the batch against the next provider |
/// | `Never` | Nobody | Surfaced as-is |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// A single endpoint attempt failed (network, timeout, status, body).
    /// Another equivalent endpoint may still answer.
    NextCandidate,

    /// One ticker could not be turned into a record.
    /// Sibling tickers are unaffected.
    SkipTicker,

    /// A whole provider batch produced nothing.
    /// The next provider tier gets its turn.
    NextTier,

    /// Nothing downstream can recover from this.
    Never,
}
