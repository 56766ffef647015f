use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Indicator display metadata
// ---------------------------------------------------------------------------

/// How to format the numeric value on the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValueFormat {
    /// `symbol` comes from the console configuration, never from code.
    Money { symbol: String },
    Number { decimals: u8 },
    Percent { decimals: u8 },
    Integer,
}

/// Visual status of the indicator (drives colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorStatus {
    Good,
    Bad,
    Neutral,
    Warning,
}

impl IndicatorStatus {
    /// Growth is good, decline is bad, no data is neutral.
    pub fn from_change(change_percent: Option<f64>) -> Self {
        match change_percent {
            Some(c) if c > 0.0 => IndicatorStatus::Good,
            Some(c) if c < 0.0 => IndicatorStatus::Bad,
            _ => IndicatorStatus::Neutral,
        }
    }
}

/// Parses growth strings returned by the analytics API ("+12.5%", "-2.1%").
pub fn parse_growth(text: &str) -> Option<f64> {
    text.trim().trim_end_matches('%').trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_growth() {
        assert_eq!(parse_growth("+12.5%"), Some(12.5));
        assert_eq!(parse_growth("-2.1%"), Some(-2.1));
        assert_eq!(parse_growth("n/a"), None);
    }

    #[test]
    fn test_status_from_change() {
        assert_eq!(IndicatorStatus::from_change(Some(3.0)), IndicatorStatus::Good);
        assert_eq!(IndicatorStatus::from_change(Some(-0.5)), IndicatorStatus::Bad);
        assert_eq!(IndicatorStatus::from_change(None), IndicatorStatus::Neutral);
    }
}
