//! Server-side SVG bar chart for the salary breakdown.

use std::fmt::Write;

use crate::prediction::breakdown::SalaryBreakdown;
use crate::prediction::currency::{group_thousands, CURRENCY_SYMBOL};

const WIDTH: f64 = 480.0;
const HEIGHT: f64 = 320.0;
const PAD_LEFT: f64 = 72.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 24.0;
const PAD_BOTTOM: f64 = 36.0;
const BAR_COLOR: &str = "green";

/// Pixel geometry of one bar, kept separate from SVG text for testing.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub amount: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lays bars out left to right, heights scaled to the largest component.
pub fn layout_bars(breakdown: &SalaryBreakdown) -> Vec<Bar> {
    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let slots = breakdown.components.len().max(1) as f64;
    let slot_w = plot_w / slots;
    let bar_w = slot_w * 0.6;
    let max = breakdown.max_amount().max(1) as f64;

    breakdown
        .components
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let height = c.amount as f64 / max * plot_h;
            Bar {
                label: c.label,
                amount: c.amount,
                x: PAD_LEFT + i as f64 * slot_w + (slot_w - bar_w) / 2.0,
                y: PAD_TOP + plot_h - height,
                width: bar_w,
                height,
            }
        })
        .collect()
}

pub fn render_svg(breakdown: &SalaryBreakdown) -> String {
    let bars = layout_bars(breakdown);
    let baseline = HEIGHT - PAD_BOTTOM;
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Salary breakdown">"#
    );
    let _ = write!(
        svg,
        r#"<line x1="{PAD_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black" stroke-width="1"/>"#,
        WIDTH - PAD_RIGHT
    );
    let _ = write!(
        svg,
        r#"<line x1="{PAD_LEFT}" y1="{PAD_TOP}" x2="{PAD_LEFT}" y2="{baseline}" stroke="black" stroke-width="1"/>"#
    );
    let _ = write!(
        svg,
        r#"<text x="{PAD_LEFT}" y="{}" font-size="10" text-anchor="end" dx="-4">{}</text>"#,
        PAD_TOP + 4.0,
        group_thousands(u128::from(breakdown.max_amount()))
    );
    let _ = write!(
        svg,
        r#"<text x="{PAD_LEFT}" y="{}" font-size="10" text-anchor="end" dx="-4">0</text>"#,
        baseline + 4.0
    );
    let _ = write!(
        svg,
        r#"<text x="14" y="{}" font-size="12" text-anchor="middle" transform="rotate(-90 14 {})">Amount ({CURRENCY_SYMBOL})</text>"#,
        HEIGHT / 2.0,
        HEIGHT / 2.0
    );

    for bar in &bars {
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{BAR_COLOR}"><title>{}: {}</title></rect>"#,
            bar.x,
            bar.y,
            bar.width,
            bar.height,
            bar.label,
            group_thousands(u128::from(bar.amount))
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{}" font-size="11" text-anchor="middle">{}</text>"#,
            bar.x + bar.width / 2.0,
            baseline + 16.0,
            bar.label
        );
    }

    svg.push_str("</svg>");
    svg
}
