use crate::domain::dataset::Dataset;
use crate::domain::portfolio::{Alert, DocumentInsight, PortfolioRecord, SectorRecord};
use crate::domain::sentiment::{AlertSeverity, RiskLevel, Sentiment};

// (name, value $M, risk, tech %, YTD %, sharpe, sentiment)
const PORTFOLIOS: [(&str, f64, f64, f64, f64, f64, Sentiment); 7] = [
    ("Growth Fund Alpha", 78.5, 6.5, 15.66, 12.4, 1.2, Sentiment::Bullish),
    ("ESG Impact Fund", 26.8, 5.2, 12.0, 8.7, 1.1, Sentiment::Neutral),
    ("Emerging Markets Fund", 19.2, 8.1, 19.0, -2.3, 0.8, Sentiment::Bearish),
    ("Real Estate Fund", 14.7, 4.8, 0.0, 6.1, 1.0, Sentiment::Neutral),
    ("Conservative Income", 5.1, 3.2, 0.0, 4.2, 1.3, Sentiment::Bullish),
    ("Technology Focus", 42.3, 7.8, 45.2, 18.9, 1.4, Sentiment::Bullish),
    ("Healthcare Plus", 33.9, 5.9, 8.3, 14.2, 1.2, Sentiment::Bullish),
];

// (sector, allocation $M, sentiment, AI score, risk level)
const SECTORS: [(&str, f64, Sentiment, f64, RiskLevel); 7] = [
    ("Technology", 68.0, Sentiment::Bullish, 8.2, RiskLevel::Medium),
    ("Healthcare", 33.0, Sentiment::Bullish, 7.8, RiskLevel::Medium),
    ("Real Estate", 19.0, Sentiment::Bearish, 4.3, RiskLevel::High),
    ("ESG/Renewable", 8.0, Sentiment::Bullish, 8.9, RiskLevel::Low),
    ("Consumer Goods", 6.0, Sentiment::Neutral, 6.1, RiskLevel::Medium),
    ("Financial Services", 25.4, Sentiment::Neutral, 5.5, RiskLevel::Medium),
    ("Energy", 12.3, Sentiment::Bearish, 3.8, RiskLevel::High),
];

const DOCUMENTS: [(&str, &str, Sentiment, &str, &str); 3] = [
    (
        "Q4_2024_Technology_Sector_Outlook.pdf",
        "Strong momentum in AI adoption and cloud infrastructure growth. Semiconductor companies showing 25% revenue growth potential.",
        Sentiment::Bullish,
        "Regulatory concerns around data privacy",
        "15-20% allocation for growth portfolios",
    ),
    (
        "ESG_Investment_Trends_2024.pdf",
        "Climate transition investments demonstrate 18% annual returns. Social impact bonds show steady 6% yields with lower volatility.",
        Sentiment::Bullish,
        "Greenwashing concerns and inconsistent ESG metrics",
        "25% allocation for institutional clients",
    ),
    (
        "Healthcare_Innovation_Investment_Opportunities.pdf",
        "Gene therapy success rates at 35%. Telemedicine retention at 40% post-pandemic. Strong defensive characteristics.",
        Sentiment::Bullish,
        "Regulatory approval timelines and patent cliff exposure",
        "60% established healthcare, 40% innovation focus",
    ),
];

const ALERTS: [(AlertSeverity, &str, &str); 4] = [
    (
        AlertSeverity::Warning,
        "Emerging Markets Fund risk score increased to 8.1",
        "2 min ago",
    ),
    (
        AlertSeverity::Success,
        "Technology Focus Fund outperforming benchmark by 5.2%",
        "15 min ago",
    ),
    (
        AlertSeverity::Info,
        "ESG Impact Fund reached target allocation",
        "1 hour ago",
    ),
    (
        AlertSeverity::Warning,
        "Real Estate sector sentiment shifted to Bearish",
        "2 hours ago",
    ),
];

const RECOMMENDATIONS: [&str; 4] = [
    "Increase Technology sector allocation by 3-5% based on positive AI sentiment",
    "Consider hedging Real Estate exposure due to bearish outlook",
    "Rebalance ESG portfolio to capture 18% return opportunity",
    "Monitor Emerging Markets volatility - consider reducing position size",
];

impl Dataset {
    /// The demo dataset. Built from literals, identical on every call.
    pub fn sample() -> Self {
        let portfolios = PORTFOLIOS
            .iter()
            .map(
                |&(name, total_value, risk_score, tech_allocation, ytd_return, sharpe_ratio, sentiment)| {
                    PortfolioRecord {
                        name: name.to_string(),
                        total_value,
                        risk_score,
                        tech_allocation,
                        ytd_return,
                        sharpe_ratio,
                        sentiment,
                    }
                },
            )
            .collect();

        let sectors = SECTORS
            .iter()
            .map(
                |&(name, total_allocation, sentiment, ai_score, risk_level)| SectorRecord {
                    name: name.to_string(),
                    total_allocation,
                    sentiment,
                    ai_score,
                    risk_level,
                },
            )
            .collect();

        let documents = DOCUMENTS
            .iter()
            .map(
                |&(document, summary, sentiment, key_risk, recommendation)| DocumentInsight {
                    document: document.to_string(),
                    summary: summary.to_string(),
                    sentiment,
                    key_risk: key_risk.to_string(),
                    recommendation: recommendation.to_string(),
                },
            )
            .collect();

        let alerts = ALERTS
            .iter()
            .map(|&(severity, message, time)| Alert {
                severity,
                message: message.to_string(),
                time: time.to_string(),
            })
            .collect();

        Self {
            portfolios,
            sectors,
            documents,
            alerts,
            recommendations: RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
