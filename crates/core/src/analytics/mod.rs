//! Filtering and the handful of scalar aggregates the dashboard shows.

use crate::domain::portfolio::{PortfolioRecord, SectorRecord};
use crate::domain::sentiment::Sentiment;
use serde::{Deserialize, Serialize};

/// Portfolios strictly above this YTD return count as high performers.
pub const HIGH_PERFORMER_THRESHOLD: f64 = 10.0;

pub const DEFAULT_MIN_VALUE: f64 = 1.0;
pub const DEFAULT_MAX_RISK: f64 = 7.0;

// Sidebar widget bounds. Filtering itself accepts any value.
pub const MIN_VALUE_BOUNDS: (f64, f64) = (0.0, 100.0);
pub const MAX_RISK_BOUNDS: (f64, f64) = (1.0, 10.0);
pub const MAX_RISK_STEP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Minimum portfolio value, $M.
    pub min_value: f64,
    /// Maximum risk score.
    pub max_risk: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_value: DEFAULT_MIN_VALUE,
            max_risk: DEFAULT_MAX_RISK,
        }
    }
}

impl FilterParams {
    pub fn matches(&self, row: &PortfolioRecord) -> bool {
        row.total_value >= self.min_value && row.risk_score <= self.max_risk
    }
}

/// Rows with `value >= min_value && risk <= max_risk`, in table order.
pub fn filter_portfolios<'a>(
    rows: &'a [PortfolioRecord],
    params: &FilterParams,
) -> Vec<&'a PortfolioRecord> {
    rows.iter().filter(|row| params.matches(row)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    pub name: String,
    pub ytd_return: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub bullish: usize,
    pub neutral: usize,
    pub bearish: usize,
}

impl SentimentCounts {
    pub fn tally<I: IntoIterator<Item = Sentiment>>(labels: I) -> Self {
        let mut out = Self::default();
        for s in labels {
            match s {
                Sentiment::Bullish => out.bullish += 1,
                Sentiment::Neutral => out.neutral += 1,
                Sentiment::Bearish => out.bearish += 1,
            }
        }
        out
    }
}

/// Aggregates over the full (unfiltered) portfolio table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub count: usize,
    pub total_value: f64,
    pub mean_value: f64,
    pub mean_risk: f64,
    pub mean_ytd_return: f64,
    pub high_performers: usize,
    pub high_performer_pct: f64,
    pub sentiment: SentimentCounts,
    pub bullish_pct: f64,
    pub best: Option<Performer>,
    pub worst: Option<Performer>,
    pub mean_sharpe: f64,
}

impl PortfolioSummary {
    /// Means and percentages are 0 and best/worst are `None` for an empty table.
    pub fn compute(rows: &[PortfolioRecord]) -> Self {
        let count = rows.len();
        let total_value: f64 = rows.iter().map(|r| r.total_value).sum();
        let high_performers = rows
            .iter()
            .filter(|r| r.ytd_return > HIGH_PERFORMER_THRESHOLD)
            .count();
        let sentiment = SentimentCounts::tally(rows.iter().map(|r| r.sentiment));

        Self {
            count,
            total_value,
            mean_value: mean(rows.iter().map(|r| r.total_value), count),
            mean_risk: mean(rows.iter().map(|r| r.risk_score), count),
            mean_ytd_return: mean(rows.iter().map(|r| r.ytd_return), count),
            high_performers,
            high_performer_pct: percent(high_performers, count),
            sentiment,
            bullish_pct: percent(sentiment.bullish, count),
            best: extreme_by_return(rows, |candidate, current| candidate > current),
            worst: extreme_by_return(rows, |candidate, current| candidate < current),
            mean_sharpe: mean(rows.iter().map(|r| r.sharpe_ratio), count),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

// Strict comparison keeps the first occurrence on ties.
fn extreme_by_return(
    rows: &[PortfolioRecord],
    replaces: impl Fn(f64, f64) -> bool,
) -> Option<Performer> {
    let mut iter = rows.iter();
    let mut pick = iter.next()?;
    for row in iter {
        if replaces(row.ytd_return, pick.ytd_return) {
            pick = row;
        }
    }
    Some(Performer {
        name: pick.name.clone(),
        ytd_return: pick.ytd_return,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorShare {
    pub name: String,
    pub total_allocation: f64,
    /// Share of the total allocation, percent.
    pub percent: f64,
    pub sentiment: Sentiment,
}

pub fn sector_shares(rows: &[SectorRecord]) -> Vec<SectorShare> {
    let total: f64 = rows.iter().map(|r| r.total_allocation).sum();
    rows.iter()
        .map(|r| SectorShare {
            name: r.name.clone(),
            total_allocation: r.total_allocation,
            percent: if total > 0.0 {
                r.total_allocation / total * 100.0
            } else {
                0.0
            },
            sentiment: r.sentiment,
        })
        .collect()
}
