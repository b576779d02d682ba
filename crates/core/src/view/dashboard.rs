use crate::analytics::{self, filter_portfolios, PortfolioSummary};
use crate::domain::portfolio::{Alert, DocumentInsight, PortfolioRecord};
use crate::domain::sentiment::{AlertSeverity, Sentiment};
use crate::view::format::{money_millions, percent0, percent1, score_of_ten, truncate_with_ellipsis};
use crate::view::{Callout, CalloutKind, MetricTile, Panel, RenderInput, APP_TITLE};
use serde::Serialize;

const DOCUMENT_TITLE_CHARS: usize = 25;

const FOOTER_MARKDOWN: &str = "\
This interactive dashboard demonstrates how **Snowflake Cortex AI** can power real-time asset management analytics:

- **AI_COMPLETE**: Document summarization and insight extraction
- **AI_CLASSIFY**: Intelligent sentiment analysis and risk categorization
- **AI_AGG**: Natural language portfolio analytics
- **Interactive Controls**: Dynamic filtering and real-time updates

**💡 Pro Tip:** In production, connect this to live Snowflake data for real-time portfolio monitoring!
";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub subtitle: &'static str,
    pub metrics: Vec<MetricTile>,
    pub scatter: ScatterChart,
    pub insights: Vec<Panel>,
    pub pie: PieChart,
    pub sector_table: Table,
    pub documents: Vec<Panel>,
    pub alerts: Vec<Callout>,
    pub recommendations: Vec<String>,
    pub performance: PerformanceSummary,
    pub footer_title: &'static str,
    pub footer_markdown: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterChart {
    pub heading: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub size_label: &'static str,
    pub points: Vec<ScatterPoint>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    /// Risk score.
    pub x: f64,
    /// Total value, $M.
    pub y: f64,
    /// Technology allocation, percent.
    pub size: f64,
    pub sentiment: Sentiment,
    pub color: &'static str,
    pub ytd_return: f64,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieChart {
    pub heading: &'static str,
    pub title: &'static str,
    pub legend: Vec<LegendEntry>,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub percent: f64,
    pub color: &'static str,
    /// `Technology / 39.6% / $68.0M`
    pub text: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub heading: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSummary {
    pub average_return: MetricTile,
    /// Markdown lines.
    pub best: Option<String>,
    pub worst: Option<String>,
    pub average_sharpe: MetricTile,
}

pub fn build(input: &RenderInput<'_>) -> DashboardView {
    let ds = input.dataset;
    let summary = PortfolioSummary::compute(&ds.portfolios);
    let filtered = filter_portfolios(&ds.portfolios, &input.filter);

    DashboardView {
        title: format!("🏦 {APP_TITLE}"),
        subtitle: "Powered by Snowflake Cortex AI",
        metrics: metric_tiles(&summary, filtered.len()),
        scatter: scatter_chart(&filtered),
        insights: filtered.iter().map(|p| insight_panel(p)).collect(),
        pie: pie_chart(input),
        sector_table: sector_table(input),
        documents: ds.documents.iter().map(document_panel).collect(),
        alerts: ds.alerts.iter().map(alert_callout).collect(),
        recommendations: ds
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| format!("**{}.** {rec}", i + 1))
            .collect(),
        performance: performance_summary(&summary),
        footer_title: "🚀 About This Dashboard",
        footer_markdown: FOOTER_MARKDOWN,
    }
}

fn legend() -> Vec<LegendEntry> {
    Sentiment::ALL
        .into_iter()
        .map(|s| LegendEntry {
            label: s.label(),
            color: s.color(),
        })
        .collect()
}

fn metric_tiles(summary: &PortfolioSummary, filtered_len: usize) -> Vec<MetricTile> {
    vec![
        MetricTile {
            label: "Total AUM",
            value: money_millions(summary.total_value),
            delta: Some(percent1(summary.mean_ytd_return)),
        },
        MetricTile {
            label: "Avg Risk Score",
            value: format!("{:.1}", summary.mean_risk),
            delta: Some(format!("{filtered_len} portfolios")),
        },
        MetricTile {
            label: "High Performers",
            value: summary.high_performers.to_string(),
            delta: Some(percent0(summary.high_performer_pct)),
        },
        MetricTile {
            label: "AI Bullish Signals",
            value: summary.sentiment.bullish.to_string(),
            delta: Some(percent0(summary.bullish_pct)),
        },
    ]
}

fn scatter_chart(filtered: &[&PortfolioRecord]) -> ScatterChart {
    ScatterChart {
        heading: "📊 Portfolio Risk vs Performance Analysis",
        title: "Risk-Adjusted Portfolio Performance",
        x_label: "Risk Score (1-10)",
        y_label: "Portfolio Value ($M)",
        size_label: "Tech Allocation (%)",
        points: filtered
            .iter()
            .map(|p| ScatterPoint {
                name: p.name.clone(),
                x: p.risk_score,
                y: p.total_value,
                size: p.tech_allocation,
                sentiment: p.sentiment,
                color: p.sentiment.color(),
                ytd_return: p.ytd_return,
                sharpe_ratio: p.sharpe_ratio,
            })
            .collect(),
        legend: legend(),
    }
}

fn insight_panel(p: &PortfolioRecord) -> Panel {
    let callout = match p.sentiment {
        Sentiment::Bullish => Callout {
            kind: CalloutKind::Success,
            text: "AI recommends maintaining or increasing allocation".to_string(),
        },
        Sentiment::Bearish => Callout {
            kind: CalloutKind::Error,
            text: "AI suggests reducing exposure or hedging".to_string(),
        },
        Sentiment::Neutral => Callout {
            kind: CalloutKind::Info,
            text: "AI indicates neutral positioning appropriate".to_string(),
        },
    };

    Panel {
        title: format!("{} {}", p.sentiment.emoji(), p.name),
        expanded: false,
        body: vec![
            format!("**Value:** {}", money_millions(p.total_value)),
            format!("**Risk Score:** {}/10", p.risk_score),
            format!("**YTD Return:** {}", percent1(p.ytd_return)),
            format!("**Sharpe Ratio:** {:.2}", p.sharpe_ratio),
        ],
        callout: Some(callout),
    }
}

fn pie_chart(input: &RenderInput<'_>) -> PieChart {
    let slices = analytics::sector_shares(&input.dataset.sectors)
        .into_iter()
        .map(|share| PieSlice {
            text: vec![
                share.name.clone(),
                percent1(share.percent),
                money_millions(share.total_allocation),
            ],
            label: share.name,
            value: share.total_allocation,
            percent: share.percent,
            color: share.sentiment.color(),
        })
        .collect();

    PieChart {
        heading: "🏭 Sector Allocation with AI Sentiment",
        title: "Sector Allocation with AI Sentiment",
        legend: legend(),
        slices,
    }
}

fn sector_table(input: &RenderInput<'_>) -> Table {
    Table {
        heading: "📊 Sector Performance Metrics",
        columns: vec![
            "Sector",
            "Total Allocation",
            "AI Score",
            "Research Sentiment",
            "Risk Level",
        ],
        rows: input
            .dataset
            .sectors
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    money_millions(s.total_allocation),
                    score_of_ten(s.ai_score),
                    s.sentiment.to_string(),
                    s.risk_level.to_string(),
                ]
            })
            .collect(),
    }
}

fn document_panel(doc: &DocumentInsight) -> Panel {
    let callout = match doc.sentiment {
        Sentiment::Bullish => Callout {
            kind: CalloutKind::Success,
            text: format!("AI Sentiment: {} - Positive outlook", doc.sentiment),
        },
        Sentiment::Neutral | Sentiment::Bearish => Callout {
            kind: CalloutKind::Info,
            text: format!("AI Sentiment: {}", doc.sentiment),
        },
    };

    Panel {
        title: format!(
            "{} {}",
            doc.sentiment.emoji(),
            truncate_with_ellipsis(&doc.document, DOCUMENT_TITLE_CHARS)
        ),
        expanded: false,
        body: vec![
            format!("**AI Summary:** {}", doc.summary),
            format!("**Key Risk:** {}", doc.key_risk),
            format!("**Recommendation:** {}", doc.recommendation),
        ],
        callout: Some(callout),
    }
}

fn alert_callout(alert: &Alert) -> Callout {
    let kind = match alert.severity {
        AlertSeverity::Warning => CalloutKind::Warning,
        AlertSeverity::Success => CalloutKind::Success,
        AlertSeverity::Info => CalloutKind::Info,
    };
    Callout {
        kind,
        text: format!("{} {} ({})", alert.severity.icon(), alert.message, alert.time),
    }
}

fn performance_summary(summary: &PortfolioSummary) -> PerformanceSummary {
    PerformanceSummary {
        average_return: MetricTile {
            label: "Average YTD Return",
            value: percent1(summary.mean_ytd_return),
            delta: None,
        },
        best: summary
            .best
            .as_ref()
            .map(|b| format!("**Best:** {} ({})", b.name, percent1(b.ytd_return))),
        worst: summary
            .worst
            .as_ref()
            .map(|w| format!("**Worst:** {} ({})", w.name, percent1(w.ytd_return))),
        average_sharpe: MetricTile {
            label: "Average Sharpe Ratio",
            value: format!("{:.2}", summary.mean_sharpe),
            delta: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::FilterParams;
    use crate::domain::dataset::Dataset;
    use crate::view::TimeRange;
    use chrono::Utc;

    fn build_with(ds: &Dataset, filter: FilterParams) -> DashboardView {
        build(&RenderInput {
            dataset: ds,
            source: "demo_dataset",
            loaded_at: Utc::now(),
            filter,
            time_range: TimeRange::default(),
        })
    }

    #[test]
    fn metric_tiles_match_sample_aggregates() {
        let ds = Dataset::sample();
        let view = build_with(&ds, FilterParams::default());

        let tiles: Vec<_> = view
            .metrics
            .iter()
            .map(|m| (m.label, m.value.as_str(), m.delta.as_deref()))
            .collect();
        assert_eq!(
            tiles,
            vec![
                ("Total AUM", "$220.5M", Some("8.9%")),
                ("Avg Risk Score", "5.9", Some("5 portfolios")),
                ("High Performers", "3", Some("43%")),
                ("AI Bullish Signals", "4", Some("57%")),
            ]
        );
    }

    #[test]
    fn scatter_and_insights_follow_filter() {
        let ds = Dataset::sample();
        let view = build_with(
            &ds,
            FilterParams {
                min_value: 30.0,
                max_risk: 10.0,
            },
        );

        let names: Vec<_> = view.scatter.points.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Growth Fund Alpha", "Technology Focus", "Healthcare Plus"]
        );
        assert_eq!(view.insights.len(), 3);
        assert_eq!(view.insights[1].title, "🟢 Technology Focus");
        assert_eq!(view.metrics[1].delta.as_deref(), Some("3 portfolios"));
        // Aggregates ignore the filter.
        assert_eq!(view.metrics[0].value, "$220.5M");
    }

    #[test]
    fn insight_panels_carry_sentiment_callouts() {
        let ds = Dataset::sample();
        let view = build_with(
            &ds,
            FilterParams {
                min_value: 0.0,
                max_risk: 10.0,
            },
        );

        let em = &view.insights[2];
        assert_eq!(em.title, "🔴 Emerging Markets Fund");
        assert_eq!(
            em.body,
            vec![
                "**Value:** $19.2M",
                "**Risk Score:** 8.1/10",
                "**YTD Return:** -2.3%",
                "**Sharpe Ratio:** 0.80",
            ]
        );
        let callout = em.callout.as_ref().unwrap();
        assert_eq!(callout.kind, CalloutKind::Error);

        assert_eq!(
            view.insights[1].callout.as_ref().unwrap().kind,
            CalloutKind::Info
        );
        assert_eq!(
            view.insights[0].callout.as_ref().unwrap().kind,
            CalloutKind::Success
        );
    }

    #[test]
    fn empty_selection_still_renders() {
        let ds = Dataset::sample();
        let view = build_with(
            &ds,
            FilterParams {
                min_value: 100.0,
                max_risk: 1.0,
            },
        );
        assert!(view.scatter.points.is_empty());
        assert!(view.insights.is_empty());
        assert_eq!(view.metrics[1].delta.as_deref(), Some("0 portfolios"));
    }

    #[test]
    fn sector_views_use_sentiment_colors() {
        let ds = Dataset::sample();
        let view = build_with(&ds, FilterParams::default());

        assert_eq!(view.pie.slices.len(), 7);
        assert_eq!(view.pie.slices[2].label, "Real Estate");
        assert_eq!(view.pie.slices[2].color, Sentiment::Bearish.color());
        assert_eq!(view.pie.slices[0].text[2], "$68.0M");

        assert_eq!(
            view.sector_table.rows[0],
            vec!["Technology", "$68.0M", "8.2/10", "Bullish", "Medium"]
        );
    }

    #[test]
    fn documents_alerts_and_recommendations() {
        let ds = Dataset::sample();
        let view = build_with(&ds, FilterParams::default());

        assert_eq!(view.documents[0].title, "🟢 Q4_2024_Technology_Sector...");
        assert_eq!(
            view.documents[0].callout.as_ref().unwrap().text,
            "AI Sentiment: Bullish - Positive outlook"
        );

        assert_eq!(view.alerts[0].kind, CalloutKind::Warning);
        assert_eq!(
            view.alerts[1].text,
            "✅ Technology Focus Fund outperforming benchmark by 5.2% (15 min ago)"
        );

        assert_eq!(view.recommendations.len(), 4);
        assert!(view.recommendations[0].starts_with("**1.** Increase Technology"));
    }

    #[test]
    fn performance_summary_lines() {
        let ds = Dataset::sample();
        let view = build_with(&ds, FilterParams::default());
        let perf = &view.performance;
        assert_eq!(perf.average_return.value, "8.9%");
        assert_eq!(
            perf.best.as_deref(),
            Some("**Best:** Technology Focus (18.9%)")
        );
        assert_eq!(
            perf.worst.as_deref(),
            Some("**Worst:** Emerging Markets Fund (-2.3%)")
        );
        assert_eq!(perf.average_sharpe.value, "1.14");
    }
}
