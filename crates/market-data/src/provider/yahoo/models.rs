//! Yahoo Finance chart API response models.
//!
//! Only the fields the normalizer reads are modelled; numeric fields decode
//! leniently so a malformed optional field becomes `None` instead of
//! rejecting the whole response.

use serde::Deserialize;

use crate::provider::numbers::{lenient_f64, lenient_i64};

/// Main response wrapper for the v8 chart API
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

/// Chart container
#[derive(Debug, Deserialize)]
pub struct YahooChart {
    #[serde(default)]
    pub result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    pub error: Option<YahooChartError>,
}

/// Error block, present when Yahoo rejects the symbol
#[derive(Debug, Deserialize)]
pub struct YahooChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Individual result from the chart API
#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: Option<YahooChartMeta>,
    #[serde(default)]
    pub indicators: Option<YahooIndicators>,
}

/// Quote metadata
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMeta {
    pub symbol: Option<String>,
    pub long_name: Option<String>,
    pub short_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub regular_market_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub previous_close: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub regular_market_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trailing_annual_dividend_yield: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub trailing_annual_dividend_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fifty_two_week_change: Option<f64>,
}

/// Parallel indicator series
#[derive(Debug, Deserialize)]
pub struct YahooIndicators {
    #[serde(default)]
    pub quote: Vec<YahooIndicatorQuote>,
}

/// OHLCV series; only volume is read
#[derive(Debug, Deserialize)]
pub struct YahooIndicatorQuote {
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_meta() {
        let json = r#"{
            "symbol": "MSTY",
            "longName": "YieldMax MSTR Option Income Strategy ETF",
            "regularMarketPrice": 25.5,
            "previousClose": 25.0,
            "regularMarketTime": 1717000000,
            "currency": "USD"
        }"#;
        let meta: YahooChartMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.symbol.as_deref(), Some("MSTY"));
        assert_eq!(meta.regular_market_price, Some(25.5));
        assert_eq!(meta.previous_close, Some(25.0));
        assert_eq!(meta.regular_market_time, Some(1717000000));
        assert!(meta.trailing_annual_dividend_rate.is_none());
    }

    #[test]
    fn test_deserialize_volume_series_with_nulls() {
        let json = r#"{"quote": [{"volume": [100, null, 250]}]}"#;
        let indicators: YahooIndicators = serde_json::from_str(json).unwrap();
        let volume = indicators.quote[0].volume.as_ref().unwrap();
        assert_eq!(volume, &vec![Some(100.0), None, Some(250.0)]);
    }

    #[test]
    fn test_deserialize_error_chart() {
        let json = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.result.is_none());
        assert_eq!(
            response.chart.error.unwrap().code.as_deref(),
            Some("Not Found")
        );
    }
}
