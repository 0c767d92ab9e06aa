//! Display rows for the dashboard table.

use serde::Serialize;
use yieldmax_market_data::CanonicalQuote;

/// Placeholder for unknown values.
pub const MISSING: &str = "—";

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub symbol: String,
    pub name: String,
    pub price: String,
    pub change: String,
    pub change_negative: bool,
    pub dividend_yield: String,
    pub monthly_payout: String,
    pub expense_ratio: String,
    pub return_of_capital: String,
    #[serde(rename = "navChange1Y")]
    pub nav_change_1y: String,
    pub nav_negative: bool,
    pub recommendation: String,
}

impl From<&CanonicalQuote> for DashboardRow {
    fn from(quote: &CanonicalQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone().unwrap_or_else(|| MISSING.to_string()),
            price: fmt_or_missing(quote.price, |v| format!("${:.2}", v)),
            change: fmt_or_missing(quote.changes_percentage, |v| signed_percent(v, 2)),
            change_negative: is_negative(quote.changes_percentage),
            dividend_yield: fmt_or_missing(quote.dividend_yield, |v| format!("{:.1}%", v)),
            monthly_payout: fmt_or_missing(quote.monthly_payout, |v| format!("${:.2}", v)),
            expense_ratio: format!("{}%", quote.expense_ratio),
            return_of_capital: fmt_or_missing(quote.return_of_capital, |v| format!("{:.1}%", v)),
            nav_change_1y: fmt_or_missing(quote.nav_change_1y, |v| signed_percent(v, 1)),
            nav_negative: is_negative(quote.nav_change_1y),
            recommendation: quote
                .recommendation()
                .map(|r| r.as_str().to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

fn fmt_or_missing(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| MISSING.to_string())
}

/// `+` only for positive values; zero (either sign) renders unsigned.
fn signed_percent(value: f64, precision: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.*}%", sign, precision, value)
}

fn is_negative(value: Option<f64>) -> bool {
    value.is_some_and(|v| v < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record_formatting() {
        let mut quote = CanonicalQuote::new("MSTY");
        quote.name = Some("YieldMax MSTR Option Income Strategy ETF".to_string());
        quote.price = Some(25.5);
        quote.changes_percentage = Some(2.0);
        quote.dividend_yield = Some(85.04);
        quote.monthly_payout = Some(1.8);
        quote.nav_change_1y = Some(-12.34);

        let row = DashboardRow::from(&quote);
        assert_eq!(row.price, "$25.50");
        assert_eq!(row.change, "+2.00%");
        assert!(!row.change_negative);
        assert_eq!(row.dividend_yield, "85.0%");
        assert_eq!(row.monthly_payout, "$1.80");
        assert_eq!(row.expense_ratio, "0.99%");
        assert_eq!(row.nav_change_1y, "-12.3%");
        assert!(row.nav_negative);
        assert_eq!(row.recommendation, "Hold");
    }

    #[test]
    fn test_absent_values_render_placeholder() {
        let mut quote = CanonicalQuote::new("TSLY");
        quote.price = Some(20.1);
        quote.changes_percentage = Some(-1.5);

        let row = DashboardRow::from(&quote);
        assert_eq!(row.name, MISSING);
        assert_eq!(row.change, "-1.50%");
        assert!(row.change_negative);
        assert_eq!(row.dividend_yield, MISSING);
        assert_eq!(row.monthly_payout, MISSING);
        assert_eq!(row.return_of_capital, MISSING);
        assert_eq!(row.nav_change_1y, MISSING);
        assert!(!row.nav_negative);
        assert_eq!(row.recommendation, MISSING);
    }

    #[test]
    fn test_zero_change_has_no_sign() {
        let mut quote = CanonicalQuote::new("YMAX");
        quote.changes_percentage = Some(0.0);
        quote.nav_change_1y = Some(-0.0);

        let row = DashboardRow::from(&quote);
        assert_eq!(row.change, "0.00%");
        assert!(!row.change_negative);
        assert_eq!(row.nav_change_1y, "0.0%");
        assert!(!row.nav_negative);
    }
}
