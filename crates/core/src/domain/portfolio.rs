use crate::domain::sentiment::{AlertSeverity, RiskLevel, Sentiment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRecord {
    pub name: String,
    /// Total value in millions of dollars.
    pub total_value: f64,
    /// Risk score on a 1-10 scale.
    pub risk_score: f64,
    /// Technology allocation, percent.
    pub tech_allocation: f64,
    /// Year-to-date return, percent (signed).
    pub ytd_return: f64,
    pub sharpe_ratio: f64,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub name: String,
    /// Total allocation in millions of dollars.
    pub total_allocation: f64,
    pub sentiment: Sentiment,
    /// AI score on a 0-10 scale.
    pub ai_score: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInsight {
    pub document: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub key_risk: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
    /// Relative timestamp text, e.g. "2 min ago".
    pub time: String,
}
