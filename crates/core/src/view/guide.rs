use crate::view::{Callout, CalloutKind, Panel};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GuideView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub intro: &'static str,
    pub overview: Panel,
    pub sections: Vec<GuideSection>,
    pub tips_heading: &'static str,
    pub tips: Vec<String>,
    pub footer: Callout,
}

/// A heading followed by panels laid out side by side, one `Vec` per column.
#[derive(Debug, Clone, Serialize)]
pub struct GuideSection {
    pub heading: &'static str,
    pub columns: Vec<Vec<Panel>>,
}

const INTRO: &str = "\
Welcome to your comprehensive guide for understanding the **Asset Management Intelligence Dashboard**.
This AI-powered platform transforms complex financial data into actionable insights.
";

const OVERVIEW: &str = "\
This dashboard is your **AI-powered command center** for investment management, answering critical questions:

- **\"Which portfolios are performing well?\"** → Performance metrics at the top
- **\"What does AI think about our investments?\"** → Color-coded sentiment analysis (🟢🟡🔴)
- **\"Where are our biggest risks?\"** → Risk scores and real-time alerts
- **\"What do the latest research reports recommend?\"** → AI document analysis
- **\"How should we adjust our strategy?\"** → Dynamic AI recommendations

**Key Benefits:**
- 🚀 **90% reduction** in document processing time
- 📊 **Real-time insights** from AI analysis of market data
- 🎯 **Actionable recommendations** tailored to your portfolio
- 📈 **Professional visualizations** for client presentations
";

const KPI_BAR: &str = "\
**Total AUM (Assets Under Management)**
- Shows combined value of all portfolios ($220M+ in demo)
- Tracks business growth and portfolio scale

**Average Risk Score**
- Portfolio risk on 1-10 scale (higher = more volatile)
- Helps assess overall risk exposure

**High Performers**
- Portfolios exceeding 10% annual returns
- Percentage shows team effectiveness

**AI Bullish Signals**
- Portfolios AI recommends as \"buy/hold\"
- Green percentage indicates AI confidence
";

const RISK_CHART: &str = "\
**How to Read:**
- **X-axis:** Risk Score (1-10) - portfolio volatility
- **Y-axis:** Portfolio Value ($M) - investment size
- **Dot Size:** Technology allocation (bigger = more tech)
- **Colors:** AI sentiment about each portfolio

**Color Meanings:**
- 🟢 **Green (Bullish):** AI recommends keeping/buying more
- 🟡 **Yellow (Neutral):** AI sees mixed signals
- 🔴 **Red (Bearish):** AI suggests reducing exposure

**Key Insights:**
- **Top-right:** High value, high risk (growth-focused)
- **Bottom-left:** Lower value, lower risk (conservative)
- **Hover:** See detailed performance metrics
";

const SECTOR_PIE: &str = "\
**Visual Elements:**
- **Slice Size:** Investment amount by industry
- **Colors:** AI sentiment by sector (same as above)
- **Labels:** Show percentage and dollar amounts

**Interactive Features:**
- **Hover:** Detailed allocation information
- **Click:** Focus on specific sectors
- **Color patterns:** Quick visual of AI outlook

**Strategic Insights:**
- Identify over/under-exposed sectors
- See where AI spots opportunities vs. risks
- Guide rebalancing decisions
";

const DOCUMENT_ANALYSIS: &str = "\
**How It Works:**
1. AI reads research PDFs using Snowflake Cortex
2. Extracts key insights via natural language processing
3. Provides summaries and recommendations
4. Identifies risks and strategic considerations

**Each Document Shows:**
- **AI Summary:** Key findings in plain English
- **Key Risk:** Main concerns identified
- **Recommendation:** Specific allocation advice
- **Sentiment:** Overall AI outlook

**Business Value:**
- Saves hours of manual document review
- Catches insights humans might miss
- Standardizes analysis across reports
";

const RISK_SCORES: &str = "\
**AI analyzes multiple factors:**
- **Historical volatility** (price fluctuations)
- **Asset types** (stocks vs. bonds)
- **Geographic exposure** (emerging markets risk)
- **Sector concentration** (diversification level)

**Scale interpretation:**
- **1-3:** Conservative (government bonds, utilities)
- **4-6:** Balanced (mixed stock/bond portfolios)
- **7-10:** Aggressive (growth stocks, crypto, emerging markets)

**Updates:** Recalculated daily with new market data
";

const SENTIMENT_ANALYSIS: &str = "\
**Snowflake Cortex AI processes:**
- **Research documents** (earnings reports, analyst notes)
- **News sentiment** (positive/negative media coverage)
- **Technical indicators** (price trends, volume)
- **Economic factors** (rates, inflation, GDP)

**AI Processing Steps:**
1. **AI_COMPLETE:** Summarizes research documents
2. **AI_CLASSIFY:** Categorizes market outlook
3. **AI_AGG:** Aggregates portfolio-level insights
4. **Real-time updates** as new data arrives

**Confidence levels** indicated by color intensity
";

const PERFORMANCE_METRICS: &str = "\
**YTD Returns:**
- Actual portfolio performance year-to-date
- Calculated from real trading data
- Compared to relevant benchmarks

**Sharpe Ratio:**
- Risk-adjusted returns (higher = better)
- Formula: (Return - Risk-free rate) / Volatility
- Industry standard for performance evaluation

**AI Scores:**
- Machine learning models trained on historical data
- Continuously updated with market patterns
- Validated against professional analyst opinions
";

const PORTFOLIO_MANAGERS: &str = "\
**Daily Actions:**
1. **Check red alerts first** - Address high-risk situations
2. **Review bearish (red) sectors** - Consider rebalancing
3. **Monitor high-risk portfolios** - Ensure client alignment
4. **Act on AI recommendations** - Use as investment input

**Weekly Reviews:**
- Compare AI sentiment vs. your analysis
- Identify sectors with changing outlooks
- Adjust position sizes based on risk scores
- Document rationale for decisions
";

const EXECUTIVES: &str = "\
**Strategic Oversight:**
1. **Track Total AUM growth** - Monitor business performance
2. **Review high performer %** - Assess team effectiveness
3. **Watch AI sentiment trends** - Understand market positioning
4. **Use for client reporting** - Professional presentations

**Key Metrics to Watch:**
- Consistent positive AI sentiment across portfolios
- Balanced risk distribution
- Strong Sharpe ratios relative to benchmarks
";

const RISK_MANAGEMENT: &str = "\
**Risk Controls:**
1. **Set risk threshold alerts** - Use sidebar filters
2. **Monitor sector concentration** - Avoid over-exposure
3. **Track correlation patterns** - Identify clustering
4. **Validate AI assessments** - Against internal models

**Alert Thresholds:**
- Risk scores > 8: Require senior approval
- Sector allocation > 30%: Flag for review
- Negative AI sentiment: Investigate immediately
";

const SIDEBAR_CONTROLS: &str = "\
**Dashboard Controls:**
- **🔄 Refresh Data:** Updates with latest information
- **📅 Time Range:** Filter by different periods
- **⚠️ Risk Threshold:** Show portfolios below risk level
- **💰 Min Portfolio Value:** Filter out smaller portfolios

**Navigation:**
- **🏦 Dashboard:** Main analytics view
- **📖 Dashboard Guide:** This help section

**Pro Tips:**
- Use risk threshold for client-specific views
- Adjust time range for trend analysis
- Combine filters for targeted insights
";

const CHART_INTERACTIONS: &str = "\
**Available Actions:**
- **Hover:** See detailed information
- **Click legend:** Hide/show data series
- **Zoom:** Mouse wheel or drag selection
- **Pan:** Click and drag to move view
- **Reset:** Double-click to return to original view

**Keyboard Shortcuts:**
- **Space + drag:** Pan chart
- **Shift + drag:** Box zoom
- **Double-click:** Reset zoom

**Export Options:**
- Download charts as PNG
- Save data tables as CSV
";

const TIPS: [&str; 8] = [
    "**Start with the metrics bar** - Get the overall picture before diving into details",
    "**Use the risk slider strategically** - Filter to match specific client risk profiles",
    "**Pay attention to color patterns** - Quick visual assessment of AI sentiment trends",
    "**Read AI document summaries** - Often contain the most actionable insights",
    "**Check alerts regularly** - Important changes are highlighted in real-time",
    "**Compare similar portfolios** - Look for patterns in the risk vs. performance chart",
    "**Hover over everything** - Most elements provide additional context on mouseover",
    "**Use time range filters** - Compare performance across different market periods",
];

const FOOTER: &str = "\
🎉 **Congratulations!** You're now ready to use the Asset Management Intelligence Dashboard effectively.

This AI-powered platform transforms hours of manual analysis into seconds of insight, helping you make better investment decisions faster.

**Need more help?** Switch back to the 🏦 Dashboard and start exploring with your new knowledge!
";

fn panel(title: &str, body: &str) -> Panel {
    Panel {
        title: title.to_string(),
        expanded: false,
        body: vec![body.to_string()],
        callout: None,
    }
}

pub fn build() -> GuideView {
    let overview = Panel {
        expanded: true,
        ..panel("🔍 **What Does This Dashboard Show You?**", OVERVIEW)
    };

    let sections = vec![
        GuideSection {
            heading: "📊 Dashboard Sections Explained",
            columns: vec![
                vec![
                    panel("📈 **Top Metrics Bar (KPIs)**", KPI_BAR),
                    panel("📈 **Risk vs Performance Chart**", RISK_CHART),
                ],
                vec![
                    panel("🏭 **Sector Allocation Pie Chart**", SECTOR_PIE),
                    panel("📄 **AI Document Analysis**", DOCUMENT_ANALYSIS),
                ],
            ],
        },
        GuideSection {
            heading: "🧮 How Are Scores Calculated?",
            columns: vec![
                vec![panel("⚠️ **Risk Scores (1-10)**", RISK_SCORES)],
                vec![panel("🤖 **AI Sentiment Analysis**", SENTIMENT_ANALYSIS)],
                vec![panel("📊 **Performance Metrics**", PERFORMANCE_METRICS)],
            ],
        },
        GuideSection {
            heading: "🎯 What Should You Do With This Information?",
            columns: vec![
                vec![panel("👨‍💼 **For Portfolio Managers**", PORTFOLIO_MANAGERS)],
                vec![panel("👔 **For Executives**", EXECUTIVES)],
                vec![panel("🛡️ **For Risk Management**", RISK_MANAGEMENT)],
            ],
        },
        GuideSection {
            heading: "🔧 Interactive Features Guide",
            columns: vec![
                vec![panel("🎛️ **Sidebar Controls**", SIDEBAR_CONTROLS)],
                vec![panel("📱 **Chart Interactions**", CHART_INTERACTIONS)],
            ],
        },
    ];

    GuideView {
        title: "📖 Dashboard Guide",
        subtitle: "Understanding Your Asset Management Intelligence Dashboard",
        intro: INTRO,
        overview,
        sections,
        tips_heading: "💡 Pro Tips for Maximum Effectiveness",
        tips: TIPS.iter().map(|t| format!("• {t}")).collect(),
        footer: Callout {
            kind: CalloutKind::Success,
            text: FOOTER.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guide_layout() {
        let guide = build();
        assert!(guide.overview.expanded);

        let panels_per_section: Vec<usize> = guide
            .sections
            .iter()
            .map(|s| s.columns.iter().map(Vec::len).sum())
            .collect();
        assert_eq!(panels_per_section, vec![4, 3, 3, 2]);

        let all_collapsed = guide
            .sections
            .iter()
            .flat_map(|s| s.columns.iter().flatten())
            .all(|p| !p.expanded);
        assert!(all_collapsed);
    }

    #[test]
    fn guide_lists_every_tip() {
        let guide = build();
        assert_eq!(guide.tips.len(), 8);
        assert!(guide.tips.iter().all(|t| t.starts_with("• **")));
        assert_eq!(guide.footer.kind, CalloutKind::Success);
    }
}
