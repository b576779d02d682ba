//! Inline SVG for the two dashboard charts.

use crate::view::dashboard::{PieChart, ScatterChart};
use crate::view::format::{escape_html, money_millions, percent1};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::{self, Write as _};

const SCATTER_WIDTH: f64 = 720.0;
const SCATTER_HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const RISK_AXIS: (f64, f64) = (1.0, 10.0);
const Y_TICKS: usize = 5;
const MIN_RADIUS: f64 = 6.0;
const MAX_RADIUS: f64 = 30.0;

const PIE_SIZE: f64 = 500.0;
const PIE_RADIUS: f64 = 180.0;

pub(crate) fn write_scatter(out: &mut String, chart: &ScatterChart) -> fmt::Result {
    let plot_w = SCATTER_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = SCATTER_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let y_max = nice_ceiling(chart.points.iter().map(|p| p.y).fold(0.0, f64::max));
    let size_max = chart.points.iter().map(|p| p.size).fold(0.0, f64::max);

    let sx = |x: f64| MARGIN_LEFT + (x - RISK_AXIS.0) / (RISK_AXIS.1 - RISK_AXIS.0) * plot_w;
    let sy = |y: f64| MARGIN_TOP + plot_h - y / y_max * plot_h;

    write!(
        out,
        r#"<svg class="chart scatter" viewBox="0 0 {SCATTER_WIDTH} {SCATTER_HEIGHT}" role="img" aria-label="{title}">"#,
        title = escape_html(chart.title)
    )?;
    write!(
        out,
        r#"<text x="{MARGIN_LEFT}" y="28" class="chart-title">{}</text>"#,
        escape_html(chart.title)
    )?;

    for tick in 1..=10 {
        let x = sx(tick as f64);
        write!(
            out,
            r#"<line x1="{x:.1}" y1="{top}" x2="{x:.1}" y2="{bottom}" class="grid"/><text x="{x:.1}" y="{label_y}" class="tick" text-anchor="middle">{tick}</text>"#,
            top = MARGIN_TOP,
            bottom = MARGIN_TOP + plot_h,
            label_y = MARGIN_TOP + plot_h + 18.0,
        )?;
    }
    for i in 0..=Y_TICKS {
        let v = y_max * i as f64 / Y_TICKS as f64;
        let y = sy(v);
        write!(
            out,
            r#"<line x1="{left}" y1="{y:.1}" x2="{right}" y2="{y:.1}" class="grid"/><text x="{label_x}" y="{y:.1}" class="tick" text-anchor="end" dominant-baseline="middle">{v:.0}</text>"#,
            left = MARGIN_LEFT,
            right = MARGIN_LEFT + plot_w,
            label_x = MARGIN_LEFT - 8.0,
        )?;
    }

    write!(
        out,
        r#"<text x="{x:.1}" y="{y:.1}" class="axis-label" text-anchor="middle">{label}</text>"#,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = SCATTER_HEIGHT - 15.0,
        label = escape_html(chart.x_label)
    )?;
    write!(
        out,
        r#"<text transform="translate(18 {y:.1}) rotate(-90)" class="axis-label" text-anchor="middle">{label}</text>"#,
        y = MARGIN_TOP + plot_h / 2.0,
        label = escape_html(chart.y_label)
    )?;

    for p in &chart.points {
        let r = if size_max > 0.0 {
            MIN_RADIUS + (p.size / size_max).sqrt() * (MAX_RADIUS - MIN_RADIUS)
        } else {
            MIN_RADIUS
        };
        write!(
            out,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{color}" fill-opacity="0.75" stroke="{color}"><title>{name}&#10;{x_label}: {x}&#10;{y_label}: {y}&#10;{size_label}: {size}&#10;YTD Return: {ytd}&#10;Sharpe Ratio: {sharpe:.2}&#10;AI Sentiment: {sentiment}</title></circle>"#,
            cx = sx(p.x),
            cy = sy(p.y),
            color = p.color,
            name = escape_html(&p.name),
            x_label = escape_html(chart.x_label),
            x = p.x,
            y_label = escape_html(chart.y_label),
            y = money_millions(p.y),
            size_label = escape_html(chart.size_label),
            size = percent1(p.size),
            ytd = percent1(p.ytd_return),
            sharpe = p.sharpe_ratio,
            sentiment = p.sentiment,
        )?;
    }

    out.push_str("</svg>");
    Ok(())
}

pub(crate) fn write_pie(out: &mut String, chart: &PieChart) -> fmt::Result {
    let c = PIE_SIZE / 2.0;

    write!(
        out,
        r#"<svg class="chart pie" viewBox="0 0 {PIE_SIZE} {PIE_SIZE}" role="img" aria-label="{}">"#,
        escape_html(chart.title)
    )?;

    // Clockwise from twelve o'clock.
    let mut start = -FRAC_PI_2;
    for slice in &chart.slices {
        let sweep = slice.percent / 100.0 * TAU;
        let label = escape_html(&slice.label);
        let tooltip = format!(
            "{label}&#10;Allocation: {}&#10;Percentage: {}",
            money_millions(slice.value),
            percent1(slice.percent)
        );

        if slice.percent >= 99.999 {
            write!(
                out,
                r##"<circle cx="{c}" cy="{c}" r="{PIE_RADIUS}" fill="{}" stroke="#fff"><title>{tooltip}</title></circle>"##,
                slice.color
            )?;
        } else if sweep > 0.0 {
            let end = start + sweep;
            let (x0, y0) = polar(c, PIE_RADIUS, start);
            let (x1, y1) = polar(c, PIE_RADIUS, end);
            let large_arc = u8::from(sweep > std::f64::consts::PI);
            write!(
                out,
                r##"<path d="M {c} {c} L {x0:.2} {y0:.2} A {PIE_RADIUS} {PIE_RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z" fill="{}" stroke="#fff"><title>{tooltip}</title></path>"##,
                slice.color
            )?;
        }

        if sweep > 0.0 {
            let (lx, ly) = polar(c, PIE_RADIUS * 0.65, start + sweep / 2.0);
            write!(out, r#"<text x="{lx:.1}" y="{ly:.1}" class="slice-label" text-anchor="middle">"#)?;
            for (i, line) in slice.text.iter().enumerate() {
                let dy = if i == 0 { -0.6 } else { 1.2 };
                write!(
                    out,
                    r#"<tspan x="{lx:.1}" dy="{dy}em">{}</tspan>"#,
                    escape_html(line)
                )?;
            }
            out.push_str("</text>");
        }

        start += sweep;
    }

    out.push_str("</svg>");
    Ok(())
}

fn polar(c: f64, r: f64, angle: f64) -> (f64, f64) {
    (c + r * angle.cos(), c + r * angle.sin())
}

/// Rounds an axis maximum up to 1, 2 or 5 times a power of ten, leaving headroom.
fn nice_ceiling(max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 10.0;
    }
    let target = max * 1.1;
    let magnitude = 10f64.powf(target.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|v| *v >= target)
        .unwrap_or(10.0 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ceiling_leaves_headroom() {
        assert_eq!(nice_ceiling(78.5), 100.0);
        assert_eq!(nice_ceiling(42.3), 50.0);
        assert_eq!(nice_ceiling(0.0), 10.0);
        assert_eq!(nice_ceiling(f64::NAN), 10.0);
        assert!(nice_ceiling(95.0) >= 95.0 * 1.1);
    }

    #[test]
    fn polar_starts_at_twelve_o_clock() {
        let (x, y) = polar(250.0, 100.0, -FRAC_PI_2);
        assert!((x - 250.0).abs() < 1e-9);
        assert!((y - 150.0).abs() < 1e-9);
    }
}
