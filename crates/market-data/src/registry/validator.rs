//! Canonical record validation.
//!
//! Runs after normalization and before a record enters a batch:
//! - The symbol is non-empty, uppercase and one of the configured tickers
//! - Every numeric field is finite or absent
//! - Prices are non-negative

use log::warn;

use crate::errors::MarketDataError;
use crate::models::{CanonicalQuote, ProviderId};

/// Validator configuration.
#[derive(Clone, Debug)]
pub struct ValidatorConfig {
    /// Whether to reject records with a negative price or previous close.
    pub reject_negative_prices: bool,
    /// Whether to warn on zero volume.
    pub warn_on_zero_volume: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            reject_negative_prices: true,
            warn_on_zero_volume: true,
        }
    }
}

/// Record validator.
#[derive(Clone, Debug, Default)]
pub struct QuoteValidator {
    config: ValidatorConfig,
}

impl QuoteValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate a record produced by `provider` against the configured tickers.
    ///
    /// Hard failures come back as `MalformedResponse`; soft issues are logged.
    pub fn validate(
        &self,
        provider: ProviderId,
        quote: &CanonicalQuote,
        tickers: &[String],
    ) -> Result<(), MarketDataError> {
        if quote.symbol.is_empty() {
            return Err(MarketDataError::malformed(provider, "empty symbol"));
        }
        if quote.symbol != quote.symbol.to_uppercase() {
            return Err(MarketDataError::malformed(
                provider,
                format!("symbol {} is not uppercase", quote.symbol),
            ));
        }
        if !tickers.iter().any(|t| t == &quote.symbol) {
            return Err(MarketDataError::malformed(
                provider,
                format!("symbol {} is not a configured ticker", quote.symbol),
            ));
        }

        for (field, value) in quote.numeric_fields() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(MarketDataError::malformed(
                        provider,
                        format!("{} is not finite for {}", field, quote.symbol),
                    ));
                }
            }
        }

        if self.config.reject_negative_prices {
            let negative = [quote.price, quote.previous_close]
                .into_iter()
                .flatten()
                .any(|p| p < 0.0);
            if negative {
                return Err(MarketDataError::malformed(
                    provider,
                    format!("negative price for {}", quote.symbol),
                ));
            }
        }

        if self.config.warn_on_zero_volume && quote.volume == Some(0) {
            warn!("{} reported zero volume for {}", provider, quote.symbol);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers() -> Vec<String> {
        vec!["MSTY".to_string(), "TSLY".to_string()]
    }

    fn quote(symbol: &str) -> CanonicalQuote {
        let mut q = CanonicalQuote::new(symbol);
        q.price = Some(20.0);
        q.previous_close = Some(19.5);
        q
    }

    #[test]
    fn test_valid_quote() {
        let validator = QuoteValidator::new();
        assert!(validator
            .validate(ProviderId::Yahoo, &quote("MSTY"), &tickers())
            .is_ok());
    }

    #[test]
    fn test_unknown_price_is_still_valid() {
        let validator = QuoteValidator::new();
        let q = CanonicalQuote::new("TSLY");
        assert!(validator.validate(ProviderId::AlphaVantage, &q, &tickers()).is_ok());
    }

    #[test]
    fn test_symbol_rules() {
        let validator = QuoteValidator::new();
        assert!(validator.validate(ProviderId::Yahoo, &quote(""), &tickers()).is_err());
        assert!(validator.validate(ProviderId::Yahoo, &quote("msty"), &tickers()).is_err());
        assert!(validator.validate(ProviderId::Yahoo, &quote("NVDY"), &tickers()).is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let validator = QuoteValidator::new();

        let mut q = quote("MSTY");
        q.changes_percentage = Some(f64::INFINITY);
        assert!(validator.validate(ProviderId::Yahoo, &q, &tickers()).is_err());

        let mut q = quote("MSTY");
        q.dividend_yield = Some(f64::NAN);
        assert!(validator.validate(ProviderId::Yahoo, &q, &tickers()).is_err());
    }

    #[test]
    fn test_negative_price_rejection_is_configurable() {
        let mut q = quote("MSTY");
        q.price = Some(-1.0);

        let strict = QuoteValidator::new();
        assert!(strict.validate(ProviderId::Yahoo, &q, &tickers()).is_err());

        let lenient = QuoteValidator::with_config(ValidatorConfig {
            reject_negative_prices: false,
            warn_on_zero_volume: false,
        });
        assert!(lenient.validate(ProviderId::Yahoo, &q, &tickers()).is_ok());
    }
}
