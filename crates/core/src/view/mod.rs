//! View model for the two dashboard pages.
//!
//! [`render`] is a pure function of its inputs: the host (HTTP handler or CLI)
//! calls it once per interaction and draws the result. Nothing here keeps state
//! between renders.

pub mod dashboard;
pub mod format;
pub mod guide;
pub mod html;
mod svg;

use crate::analytics::FilterParams;
use crate::domain::dataset::Dataset;
use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const APP_TITLE: &str = "Asset Management Intelligence Dashboard";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Dashboard,
    Guide,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Dashboard, Page::Guide];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Guide => "guide",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Dashboard => "🏦 Dashboard",
            Page::Guide => "📖 Dashboard Guide",
        }
    }
}

impl FromStr for Page {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dashboard" => Ok(Page::Dashboard),
            "guide" => Ok(Page::Guide),
            other => bail!("unknown page: {other:?} (expected dashboard or guide)"),
        }
    }
}

/// Sidebar time range selector. Echoed back in the view; the demo data has no
/// time dimension to slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "last-90-days")]
    Last90Days,
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[serde(rename = "last-year")]
    LastYear,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Last30Days,
        TimeRange::Last90Days,
        TimeRange::Last6Months,
        TimeRange::LastYear,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            TimeRange::Last30Days => "last-30-days",
            TimeRange::Last90Days => "last-90-days",
            TimeRange::Last6Months => "last-6-months",
            TimeRange::LastYear => "last-year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Last30Days => "Last 30 Days",
            TimeRange::Last90Days => "Last 90 Days",
            TimeRange::Last6Months => "Last 6 Months",
            TimeRange::LastYear => "Last Year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeRange::ALL
            .into_iter()
            .find(|t| t.slug() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown time range: {s:?}"))
    }
}

#[derive(Debug, Clone)]
pub struct RenderInput<'a> {
    pub dataset: &'a Dataset,
    pub source: &'a str,
    pub loaded_at: DateTime<Utc>,
    pub filter: FilterParams,
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub render_id: Uuid,
    pub sidebar: Sidebar,
    #[serde(flatten)]
    pub body: PageView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Dashboard(dashboard::DashboardView),
    Guide(guide::GuideView),
}

#[derive(Debug, Clone, Serialize)]
pub struct Sidebar {
    pub page: Page,
    /// Present on the dashboard page only.
    pub controls: Option<Controls>,
    pub technical: TechnicalDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct Controls {
    pub time_range: TimeRange,
    pub risk_threshold: f64,
    pub min_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalDetails {
    pub data_last_updated: String,
    pub connected_to: &'static str,
    pub source: String,
    pub refresh_rate: &'static str,
    pub ai_models: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
    pub delta: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutKind {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Callout {
    pub kind: CalloutKind,
    /// Markdown.
    pub text: String,
}

/// An expandable panel. Body blocks are markdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub expanded: bool,
    pub body: Vec<String>,
    pub callout: Option<Callout>,
}

pub fn render(page: Page, input: &RenderInput<'_>) -> RenderedPage {
    let controls = match page {
        Page::Dashboard => Some(Controls {
            time_range: input.time_range,
            risk_threshold: input.filter.max_risk,
            min_value: input.filter.min_value,
        }),
        Page::Guide => None,
    };

    let body = match page {
        Page::Dashboard => PageView::Dashboard(dashboard::build(input)),
        Page::Guide => PageView::Guide(guide::build()),
    };

    RenderedPage {
        render_id: Uuid::new_v4(),
        sidebar: Sidebar {
            page,
            controls,
            technical: TechnicalDetails {
                data_last_updated: input.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                connected_to: "Demo Dataset",
                source: input.source.to_string(),
                refresh_rate: "Real-time",
                ai_models: "Snowflake Cortex",
            },
        },
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(ds: &Dataset) -> RenderInput<'_> {
        RenderInput {
            dataset: ds,
            source: "demo_dataset",
            loaded_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 5).unwrap(),
            filter: FilterParams::default(),
            time_range: TimeRange::Last90Days,
        }
    }

    #[test]
    fn dashboard_render_echoes_controls() {
        let ds = Dataset::sample();
        let page = render(Page::Dashboard, &input(&ds));
        let controls = page.sidebar.controls.unwrap();
        assert_eq!(controls.time_range, TimeRange::Last90Days);
        assert_eq!(controls.risk_threshold, 7.0);
        assert_eq!(controls.min_value, 1.0);
        assert_eq!(page.sidebar.technical.data_last_updated, "2026-03-02 09:30:05");
        assert!(matches!(page.body, PageView::Dashboard(_)));
    }

    #[test]
    fn guide_render_has_no_controls() {
        let ds = Dataset::sample();
        let page = render(Page::Guide, &input(&ds));
        assert!(page.sidebar.controls.is_none());
        assert!(matches!(page.body, PageView::Guide(_)));
    }

    #[test]
    fn render_is_deterministic_apart_from_render_id() {
        let ds = Dataset::sample();
        let a = serde_json::to_value(render(Page::Dashboard, &input(&ds))).unwrap();
        let b = serde_json::to_value(render(Page::Dashboard, &input(&ds))).unwrap();
        assert_ne!(a["render_id"], b["render_id"]);
        assert_eq!(a["metrics"], b["metrics"]);
        assert_eq!(a["insights"], b["insights"]);
        assert_eq!(a["page"], "dashboard");
    }

    #[test]
    fn parses_page_and_time_range_slugs() {
        for p in Page::ALL {
            assert_eq!(p.slug().parse::<Page>().unwrap(), p);
        }
        for t in TimeRange::ALL {
            assert_eq!(t.slug().parse::<TimeRange>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.slug()));
        }
        assert!("home".parse::<Page>().is_err());
        assert!("Last 30 Days".parse::<TimeRange>().is_err());
    }
}
