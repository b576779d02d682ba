use crate::domain::portfolio::{Alert, DocumentInsight, PortfolioRecord, SectorRecord};
use anyhow::ensure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const RISK_SCORE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=10.0;
pub const AI_SCORE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// Everything one dashboard render reads. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub portfolios: Vec<PortfolioRecord>,
    pub sectors: Vec<SectorRecord>,
    pub documents: Vec<DocumentInsight>,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
}

impl Dataset {
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = BTreeSet::new();
        for p in &self.portfolios {
            ensure!(!p.name.trim().is_empty(), "portfolio name must be non-empty");
            ensure!(
                seen.insert(p.name.as_str()),
                "duplicate portfolio name: {}",
                p.name
            );
            ensure!(
                RISK_SCORE_RANGE.contains(&p.risk_score),
                "risk score out of range for {}: {}",
                p.name,
                p.risk_score
            );
            ensure!(
                p.total_value.is_finite() && p.total_value >= 0.0,
                "total value must be non-negative for {} (got {})",
                p.name,
                p.total_value
            );
            ensure!(
                (0.0..=100.0).contains(&p.tech_allocation),
                "tech allocation must be a percentage for {} (got {})",
                p.name,
                p.tech_allocation
            );
            ensure!(
                p.ytd_return.is_finite() && p.sharpe_ratio.is_finite(),
                "non-finite return figures for {}",
                p.name
            );
        }

        let mut seen = BTreeSet::new();
        for s in &self.sectors {
            ensure!(!s.name.trim().is_empty(), "sector name must be non-empty");
            ensure!(seen.insert(s.name.as_str()), "duplicate sector name: {}", s.name);
            ensure!(
                s.total_allocation.is_finite() && s.total_allocation >= 0.0,
                "allocation must be non-negative for {} (got {})",
                s.name,
                s.total_allocation
            );
            ensure!(
                AI_SCORE_RANGE.contains(&s.ai_score),
                "AI score out of range for {}: {}",
                s.name,
                s.ai_score
            );
        }

        for d in &self.documents {
            ensure!(!d.document.trim().is_empty(), "document name must be non-empty");
        }

        Ok(())
    }
}
