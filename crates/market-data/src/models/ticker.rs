/// The YieldMax ETF tickers tracked when nothing else is configured.
pub const DEFAULT_TICKERS: &[&str] = &["MSTY", "TSLY", "NVDY", "CONY", "ULTY", "YMAX"];

/// Expense ratio (percent) shared by the whole YieldMax family.
pub const FAMILY_EXPENSE_RATIO: f64 = 0.99;

/// Canonicalize a ticker list: trim, uppercase, drop empties and duplicates.
///
/// Order of first occurrence is kept since batch results are aligned with it.
pub fn normalize_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for raw in tickers {
        let symbol = raw.as_ref().trim().to_uppercase();
        if symbol.is_empty() || out.contains(&symbol) {
            continue;
        }
        out.push(symbol);
    }
    out
}

/// The default ticker set as owned strings.
pub fn default_tickers() -> Vec<String> {
    normalize_tickers(DEFAULT_TICKERS.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tickers() {
        let tickers = normalize_tickers([" msty", "TSLY", "", "msty", "nvdy "]);
        assert_eq!(tickers, vec!["MSTY", "TSLY", "NVDY"]);
    }

    #[test]
    fn test_default_tickers() {
        let tickers = default_tickers();
        assert_eq!(tickers.len(), 6);
        assert_eq!(tickers[0], "MSTY");
        assert_eq!(tickers[5], "YMAX");
    }
}
