//! Server-side HTML for a [`RenderedPage`].
//!
//! Markdown blocks go through pulldown-cmark with raw HTML downgraded to text,
//! so dataset strings can never inject markup. Everything else is escaped at
//! the point of interpolation.

use anyhow::Context;

use crate::analytics::{MAX_RISK_BOUNDS, MAX_RISK_STEP, MIN_VALUE_BOUNDS};
use crate::view::dashboard::{DashboardView, Table};
use crate::view::format::escape_html;
use crate::view::guide::GuideView;
use crate::view::{
    svg, Callout, CalloutKind, MetricTile, Page, PageView, Panel, RenderedPage, Sidebar, TimeRange,
    APP_TITLE,
};
use pulldown_cmark::{html, Event, Parser};
use std::fmt::{self, Write as _};

const STYLE: &str = r#"
:root { --bg: #ffffff; --sidebar: #f0f2f6; --text: #262730; --muted: #6b6f7b; --border: #e6e9ef;
  --success: #d4edda; --info: #dbeafe; --warning: #fff3cd; --error: #f8d7da; --radius: 8px; }
* { box-sizing: border-box; }
body { margin: 0; font-family: "Source Sans Pro", system-ui, -apple-system, sans-serif; color: var(--text); background: var(--bg); }
.layout { display: flex; min-height: 100vh; }
aside { width: 300px; flex-shrink: 0; background: var(--sidebar); padding: 24px 20px; }
aside label { display: block; margin: 14px 0 4px; font-weight: 600; font-size: 14px; }
aside select, aside input[type=number] { width: 100%; padding: 6px; }
aside input[type=range] { width: 100%; }
aside .technical { font-size: 13px; color: var(--muted); }
main { flex: 1; padding: 24px 40px; max-width: 1400px; }
hr { border: none; border-top: 1px solid var(--border); margin: 24px 0; }
.row { display: grid; gap: 24px; }
.cols-4 { grid-template-columns: repeat(4, 1fr); }
.cols-3 { grid-template-columns: repeat(3, 1fr); }
.cols-2 { grid-template-columns: repeat(2, 1fr); }
.cols-2-1 { grid-template-columns: 2fr 1fr; }
.metric .label { font-size: 14px; color: var(--muted); }
.metric .value { font-size: 32px; }
.metric .delta { font-size: 14px; color: #09ab3b; }
details { border: 1px solid var(--border); border-radius: var(--radius); margin: 8px 0; padding: 8px 12px; }
summary { cursor: pointer; }
summary p { display: inline; margin: 0; }
.callout { border-radius: var(--radius); padding: 10px 14px; margin: 8px 0; }
.callout p { margin: 0 0 6px; }
.callout.success { background: var(--success); }
.callout.info { background: var(--info); }
.callout.warning { background: var(--warning); }
.callout.error { background: var(--error); }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid var(--border); }
.chart { width: 100%; height: auto; }
.chart .grid { stroke: var(--border); }
.chart .tick, .chart .axis-label { font-size: 12px; fill: var(--muted); }
.chart .chart-title { font-size: 16px; }
.chart .slice-label { font-size: 11px; }
.legend span { display: inline-block; margin-right: 12px; font-size: 13px; }
.legend i { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 4px; }
"#;

pub fn render_page(page: &RenderedPage) -> anyhow::Result<String> {
    let mut out = String::with_capacity(64 * 1024);
    write_document(&mut out, page)
        .with_context(|| format!("failed to write html for render {}", page.render_id))?;
    Ok(out)
}

/// Markdown to HTML. Raw HTML in the source is rendered as text.
pub fn markdown(md: &str) -> String {
    let events = Parser::new(md).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

/// Markdown for a single line, without the wrapping paragraph.
pub fn inline_markdown(md: &str) -> String {
    let rendered = markdown(md);
    let trimmed = rendered.trim_end();
    trimmed
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .unwrap_or(trimmed)
        .to_string()
}

fn write_document(out: &mut String, page: &RenderedPage) -> fmt::Result {
    write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>🏦 {APP_TITLE}</title><style>{STYLE}</style></head><body data-render-id="{}"><div class="layout">"#,
        page.render_id
    )?;

    write_sidebar(out, &page.sidebar)?;

    out.push_str("<main>");
    match &page.body {
        PageView::Dashboard(view) => write_dashboard(out, view)?,
        PageView::Guide(view) => write_guide(out, view)?,
    }
    out.push_str("</main></div></body></html>");
    Ok(())
}

fn write_sidebar(out: &mut String, sidebar: &Sidebar) -> fmt::Result {
    out.push_str(r#"<aside><form method="get" action="/">"#);

    out.push_str(r#"<label for="page">📋 Navigate</label><select id="page" name="page" onchange="this.form.submit()">"#);
    for p in Page::ALL {
        write!(
            out,
            r#"<option value="{}"{}>{}</option>"#,
            p.slug(),
            selected(p == sidebar.page),
            escape_html(p.label())
        )?;
    }
    out.push_str("</select>");

    if let Some(controls) = &sidebar.controls {
        out.push_str("<h3>📊 Dashboard Controls</h3>");
        out.push_str(r#"<button type="submit" name="refresh" value="true">🔄 Refresh Data</button>"#);

        out.push_str(r#"<label for="time_range">📅 Time Range</label><select id="time_range" name="time_range">"#);
        for t in TimeRange::ALL {
            write!(
                out,
                r#"<option value="{}"{}>{}</option>"#,
                t.slug(),
                selected(t == controls.time_range),
                escape_html(t.label())
            )?;
        }
        out.push_str("</select>");

        write!(
            out,
            r#"<label for="max_risk">⚠️ Risk Threshold: <output>{risk}</output></label><input type="range" id="max_risk" name="max_risk" min="{min}" max="{max}" step="{MAX_RISK_STEP}" value="{risk}" oninput="this.previousElementSibling.firstElementChild.value=this.value">"#,
            risk = controls.risk_threshold,
            min = MAX_RISK_BOUNDS.0,
            max = MAX_RISK_BOUNDS.1,
        )?;
        write!(
            out,
            r#"<label for="min_value">💰 Min Portfolio Value ($M)</label><input type="number" id="min_value" name="min_value" min="{min}" max="{max}" step="any" value="{value}">"#,
            value = controls.min_value,
            min = MIN_VALUE_BOUNDS.0,
            max = MIN_VALUE_BOUNDS.1,
        )?;
        out.push_str(r#"<p><button type="submit">Apply</button></p>"#);

        out.push_str("<hr><h3>💡 Need Help?</h3>");
        out.push_str(&markdown(
            "Switch to **📖 Dashboard Guide** page for detailed explanations!",
        ));
    }
    out.push_str("</form>");

    let t = &sidebar.technical;
    write!(
        out,
        r#"<hr><div class="technical"><p><strong>🔧 Technical Details</strong></p><p>Data last updated: {}</p><p>Connected to: {} <small>({})</small></p><p>Refresh rate: {}</p><p><strong>AI Models:</strong> {}</p></div>"#,
        escape_html(&t.data_last_updated),
        escape_html(t.connected_to),
        escape_html(&t.source),
        escape_html(t.refresh_rate),
        escape_html(t.ai_models)
    )?;

    out.push_str("</aside>");
    Ok(())
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}

fn write_dashboard(out: &mut String, view: &DashboardView) -> fmt::Result {
    write!(
        out,
        "<h1>{}</h1><h3>{}</h3><hr>",
        escape_html(&view.title),
        escape_html(view.subtitle)
    )?;

    out.push_str(r#"<section class="row cols-4 metrics">"#);
    for tile in &view.metrics {
        write_metric(out, tile)?;
    }
    out.push_str("</section><hr>");

    out.push_str(r#"<section class="row cols-2-1"><div>"#);
    write!(out, "<h2>{}</h2>", escape_html(view.scatter.heading))?;
    svg::write_scatter(out, &view.scatter)?;
    write_legend(out, view.scatter.legend.iter().map(|l| (l.label, l.color)))?;
    out.push_str("</div><div><h2>🎯 AI Investment Insights</h2>");
    for panel in &view.insights {
        write_panel(out, panel)?;
    }
    out.push_str("</div></section><hr>");

    out.push_str(r#"<section class="row cols-2"><div>"#);
    write!(out, "<h2>{}</h2>", escape_html(view.pie.heading))?;
    write_legend(out, view.pie.legend.iter().map(|l| (l.label, l.color)))?;
    svg::write_pie(out, &view.pie)?;
    write_table(out, &view.sector_table)?;
    out.push_str("</div><div><h2>📄 AI Document Analysis</h2>");
    for panel in &view.documents {
        write_panel(out, panel)?;
    }
    out.push_str("</div></section><hr>");

    out.push_str(r#"<section class="row cols-3"><div><h2>⚡ Real-time Alerts</h2>"#);
    for alert in &view.alerts {
        write_callout(out, alert)?;
    }
    out.push_str("</div><div><h2>🎯 AI Recommendations</h2>");
    for rec in &view.recommendations {
        out.push_str(&markdown(rec));
    }
    out.push_str("</div><div><h2>📈 Performance Summary</h2>");
    let perf = &view.performance;
    write_metric(out, &perf.average_return)?;
    for line in [&perf.best, &perf.worst].into_iter().flatten() {
        out.push_str(&markdown(line));
    }
    write_metric(out, &perf.average_sharpe)?;
    out.push_str("</div></section><hr>");

    write!(out, "<h4>{}</h4>", escape_html(view.footer_title))?;
    out.push_str(&markdown(view.footer_markdown));
    Ok(())
}

fn write_guide(out: &mut String, view: &GuideView) -> fmt::Result {
    write!(
        out,
        "<h1>{}</h1><h3>{}</h3><hr>",
        escape_html(view.title),
        escape_html(view.subtitle)
    )?;
    out.push_str(&markdown(view.intro));
    write_panel(out, &view.overview)?;

    for section in &view.sections {
        write!(out, "<h2>{}</h2>", escape_html(section.heading))?;
        write!(out, r#"<section class="row cols-{}">"#, section.columns.len())?;
        for column in &section.columns {
            out.push_str("<div>");
            for panel in column {
                write_panel(out, panel)?;
            }
            out.push_str("</div>");
        }
        out.push_str("</section>");
    }

    write!(out, "<h2>{}</h2>", escape_html(view.tips_heading))?;
    for tip in &view.tips {
        out.push_str(&markdown(tip));
    }
    out.push_str("<hr>");
    write_callout(out, &view.footer)
}

fn write_metric(out: &mut String, tile: &MetricTile) -> fmt::Result {
    write!(
        out,
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div>"#,
        escape_html(tile.label),
        escape_html(&tile.value)
    )?;
    if let Some(delta) = &tile.delta {
        write!(out, r#"<div class="delta">{}</div>"#, escape_html(delta))?;
    }
    out.push_str("</div>");
    Ok(())
}

fn write_panel(out: &mut String, panel: &Panel) -> fmt::Result {
    write!(
        out,
        "<details{}><summary>{}</summary>",
        if panel.expanded { " open" } else { "" },
        inline_markdown(&panel.title)
    )?;
    for block in &panel.body {
        out.push_str(&markdown(block));
    }
    if let Some(callout) = &panel.callout {
        write_callout(out, callout)?;
    }
    out.push_str("</details>");
    Ok(())
}

fn write_callout(out: &mut String, callout: &Callout) -> fmt::Result {
    let class = match callout.kind {
        CalloutKind::Success => "success",
        CalloutKind::Info => "info",
        CalloutKind::Warning => "warning",
        CalloutKind::Error => "error",
    };
    write!(
        out,
        r#"<div class="callout {class}">{}</div>"#,
        markdown(&callout.text)
    )
}

fn write_legend<'a>(
    out: &mut String,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> fmt::Result {
    out.push_str(r#"<div class="legend">"#);
    for (label, color) in entries {
        write!(
            out,
            r#"<span><i style="background:{color}"></i>{}</span>"#,
            escape_html(label)
        )?;
    }
    out.push_str("</div>");
    Ok(())
}

fn write_table(out: &mut String, table: &Table) -> fmt::Result {
    write!(out, "<h2>{}</h2><table><thead><tr>", escape_html(table.heading))?;
    for col in &table.columns {
        write!(out, "<th>{}</th>", escape_html(col))?;
    }
    out.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            write!(out, "<td>{}</td>", escape_html(cell))?;
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    Ok(())
}
