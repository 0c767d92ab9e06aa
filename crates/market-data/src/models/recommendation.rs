use serde::{Deserialize, Serialize};

/// Position verdict derived from NAV erosion and distribution yield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Hold,
    Reduce,
    Replace,
}

impl Recommendation {
    /// Evaluate from 1-year NAV change and dividend yield, both in percent.
    pub fn evaluate(nav_change_1y: f64, dividend_yield: f64) -> Self {
        if nav_change_1y > -20.0 && dividend_yield > 50.0 {
            Recommendation::Hold
        } else if nav_change_1y < -50.0 || dividend_yield < 30.0 {
            Recommendation::Replace
        } else if nav_change_1y < -30.0 {
            Recommendation::Reduce
        } else {
            Recommendation::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Hold => "Hold",
            Recommendation::Reduce => "Reduce",
            Recommendation::Replace => "Replace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_fund_is_held() {
        assert_eq!(Recommendation::evaluate(-5.0, 75.0), Recommendation::Hold);
    }

    #[test]
    fn test_deep_nav_loss_is_replaced() {
        assert_eq!(Recommendation::evaluate(-60.0, 90.0), Recommendation::Replace);
    }

    #[test]
    fn test_low_yield_is_replaced() {
        assert_eq!(Recommendation::evaluate(10.0, 25.0), Recommendation::Replace);
    }

    #[test]
    fn test_moderate_nav_loss_is_reduced() {
        assert_eq!(Recommendation::evaluate(-40.0, 45.0), Recommendation::Reduce);
    }

    #[test]
    fn test_middle_ground_is_held() {
        assert_eq!(Recommendation::evaluate(-25.0, 40.0), Recommendation::Hold);
    }
}
