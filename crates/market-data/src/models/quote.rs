use serde::{Deserialize, Serialize};

use super::recommendation::Recommendation;
use super::ticker::FAMILY_EXPENSE_RATIO;

/// Canonical ETF quote record produced by both normalizers.
///
/// Every optional field is either a finite number or `None`. `None` means
/// "unknown" and is never replaced with zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalQuote {
    /// Ticker, uppercase, always one of the configured tickers
    pub symbol: String,

    /// Fund name (long name preferred)
    pub name: Option<String>,

    /// Current trade price
    pub price: Option<f64>,

    /// Percent change vs previous close
    pub changes_percentage: Option<f64>,

    pub previous_close: Option<f64>,

    /// Most recent traded volume
    pub volume: Option<u64>,

    /// Quote time, unix seconds
    pub timestamp: Option<i64>,

    /// Trailing dividend yield in percent
    pub dividend_yield: Option<f64>,

    /// Annual dividend rate / 12
    pub monthly_payout: Option<f64>,

    /// Fixed family expense ratio in percent
    pub expense_ratio: f64,

    /// Percent change over 52 weeks
    #[serde(rename = "navChange1Y")]
    pub nav_change_1y: Option<f64>,

    /// No data source exposes this; always `None`
    pub return_of_capital: Option<f64>,
}

impl CanonicalQuote {
    /// Create an empty record for a symbol; only the expense ratio is known.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            price: None,
            changes_percentage: None,
            previous_close: None,
            volume: None,
            timestamp: None,
            dividend_yield: None,
            monthly_payout: None,
            expense_ratio: FAMILY_EXPENSE_RATIO,
            nav_change_1y: None,
            return_of_capital: None,
        }
    }

    /// Hold/reduce/replace verdict, when both inputs are known.
    pub fn recommendation(&self) -> Option<Recommendation> {
        match (self.nav_change_1y, self.dividend_yield) {
            (Some(nav), Some(yield_pct)) => Some(Recommendation::evaluate(nav, yield_pct)),
            _ => None,
        }
    }

    /// Iterate the optional numeric fields as (name, value) pairs.
    pub(crate) fn numeric_fields(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("price", self.price),
            ("changesPercentage", self.changes_percentage),
            ("previousClose", self.previous_close),
            ("dividendYield", self.dividend_yield),
            ("monthlyPayout", self.monthly_payout),
            ("expenseRatio", Some(self.expense_ratio)),
            ("navChange1Y", self.nav_change_1y),
            ("returnOfCapital", self.return_of_capital),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_quote_is_all_unknown() {
        let quote = CanonicalQuote::new("MSTY");
        assert_eq!(quote.symbol, "MSTY");
        assert!(quote.price.is_none());
        assert!(quote.volume.is_none());
        assert!(quote.return_of_capital.is_none());
        assert_eq!(quote.expense_ratio, 0.99);
        assert!(quote.recommendation().is_none());
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let mut quote = CanonicalQuote::new("YMAX");
        quote.price = Some(15.2);
        quote.nav_change_1y = Some(-12.5);

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["symbol"], "YMAX");
        assert_eq!(json["price"], 15.2);
        assert_eq!(json["navChange1Y"], -12.5);
        assert!(json["dividendYield"].is_null());
        assert!(json["changesPercentage"].is_null());
        assert_eq!(json["expenseRatio"], 0.99);
    }

    #[test]
    fn test_recommendation_requires_both_inputs() {
        let mut quote = CanonicalQuote::new("CONY");
        quote.dividend_yield = Some(80.0);
        assert!(quote.recommendation().is_none());

        quote.nav_change_1y = Some(-10.0);
        assert_eq!(quote.recommendation(), Some(Recommendation::Hold));
    }
}
