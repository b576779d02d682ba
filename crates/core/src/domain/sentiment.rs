use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification label attached to a portfolio, sector or research document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Bullish, Sentiment::Neutral, Sentiment::Bearish];

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Neutral => "Neutral",
            Sentiment::Bearish => "Bearish",
        }
    }

    /// Chart color shared by every visualization.
    pub fn color(self) -> &'static str {
        match self {
            Sentiment::Bullish => "#2E8B57",
            Sentiment::Neutral => "#FFD700",
            Sentiment::Bearish => "#DC143C",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Sentiment::Bullish => "🟢",
            Sentiment::Neutral => "🟡",
            Sentiment::Bearish => "🔴",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bullish" => Ok(Sentiment::Bullish),
            "Neutral" => Ok(Sentiment::Neutral),
            "Bearish" => Ok(Sentiment::Bearish),
            other => bail!("unknown sentiment label: {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Warning,
    Success,
    Info,
}

impl AlertSeverity {
    pub fn icon(self) -> &'static str {
        match self {
            AlertSeverity::Warning => "⚠️",
            AlertSeverity::Success => "✅",
            AlertSeverity::Info => "ℹ️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sentiment_has_distinct_color_and_emoji() {
        let colors: std::collections::HashSet<_> =
            Sentiment::ALL.iter().map(|s| s.color()).collect();
        let emojis: std::collections::HashSet<_> =
            Sentiment::ALL.iter().map(|s| s.emoji()).collect();
        assert_eq!(colors.len(), 3);
        assert_eq!(emojis.len(), 3);
    }

    #[test]
    fn parses_known_labels_and_rejects_others() {
        for s in Sentiment::ALL {
            assert_eq!(s.label().parse::<Sentiment>().unwrap(), s);
        }
        assert!("Bullsih".parse::<Sentiment>().is_err());
        assert!("".parse::<Sentiment>().is_err());
    }

    #[test]
    fn serializes_as_capitalized_label() {
        let json = serde_json::to_string(&Sentiment::Bearish).unwrap();
        assert_eq!(json, "\"Bearish\"");
        let json = serde_json::to_string(&AlertSeverity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
