use chrono::{Datelike, NaiveDate};

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const PADDING: f64 = 48.0;
const MAX_TIME_LABELS: usize = 12;
const Y_TICKS: usize = 5;

/// How the y-axis tick labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// `1.25x`
    Multiple,
    /// `-12.5%`
    Percent,
}

impl ValueFormat {
    fn format(self, value: f64) -> String {
        match self {
            ValueFormat::Multiple => format!("{value:.2}x"),
            ValueFormat::Percent => format!("{:.1}%", value * 100.0),
        }
    }
}

/// Title and axis titles of one chart.
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_axis: &'a str,
    pub y_axis: &'a str,
}

/// One line of a chart. `values` is parallel to the chart's dates.
pub struct LineSeries<'a> {
    pub label: &'a str,
    pub color: &'static str,
    pub values: &'a [Option<f64>],
}

fn svg_header(title: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style><rect width="100%" height="100%" fill="#ffffff" /><text x="{x:.2}" y="{y:.2}" text-anchor="middle" style="font-size:14px;fill:#222">{title}</text>"##,
        w = WIDTH,
        h = HEIGHT,
        x = WIDTH / 2.0,
        y = PADDING / 2.0,
        title = escape(title)
    )
}

fn add_axis_titles(svg: &mut String, x_axis: &str, y_axis: &str) {
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" class="axis-title">{label}</text>"#,
        x = WIDTH / 2.0,
        y = HEIGHT - 8.0,
        label = escape(x_axis)
    ));
    let (x, y) = (12.0, HEIGHT / 2.0);
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" class="axis-title" transform="rotate(-90 {x:.2} {y:.2})">{label}</text>"#,
        label = escape(y_axis)
    ));
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn x_positions(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![WIDTH / 2.0],
        _ => {
            let inner_width = WIDTH - 2.0 * PADDING;
            (0..len)
                .map(|i| PADDING + inner_width * (i as f64 / (len - 1) as f64))
                .collect()
        }
    }
}

/// Min and max over every defined value. Flat ranges are widened.
fn extent(series: &[LineSeries<'_>]) -> Option<(f64, f64)> {
    let mut values = series
        .iter()
        .flat_map(|s| s.values.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .peekable();
    values.peek()?;

    let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min == max {
        let adjust = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        min -= adjust;
        max += adjust;
    }
    Some((min, max))
}

fn scale_value(value: f64, min: f64, max: f64) -> f64 {
    let inner_height = HEIGHT - 2.0 * PADDING;
    let norm = (value - min) / (max - min);
    PADDING + (1.0 - norm) * inner_height
}

/// Splits a column into runs of defined points; an undefined cell breaks the line.
fn segments(xs: &[f64], values: &[Option<f64>], min: f64, max: f64) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (x, value) in xs.iter().zip(values) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => current.push((*x, scale_value(v, min, max))),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn polyline(points: &[(f64, f64)], stroke: &str) -> String {
    let coords = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5" points="{coords}" />"#)
}

fn add_value_axis(svg: &mut String, min: f64, max: f64, format: ValueFormat) {
    for i in 0..=Y_TICKS {
        let value = min + (max - min) * (i as f64 / Y_TICKS as f64);
        let y = scale_value(value, min, max);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#eeeeee" stroke-width="0.5" />"##,
            x1 = PADDING,
            x2 = WIDTH - PADDING,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = PADDING - 6.0,
            y = y + 3.0,
            label = format.format(value)
        ));
    }
}

/// Labels the first date of every `step`-th month, keeping at most `MAX_TIME_LABELS` labels.
fn add_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64]) {
    let axis_y = HEIGHT - PADDING + 5.0;
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{axis_y:.2}" x2="{x2:.2}" y2="{axis_y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
    ));

    let month_index = |d: &NaiveDate| d.year() * 12 + d.month0() as i32;
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return;
    };
    let span = (month_index(last) - month_index(first) + 1) as usize;
    let step = span.div_ceil(MAX_TIME_LABELS).max(1) as i32;

    let mut last_month = None;
    for (date, x) in dates.iter().zip(xs) {
        let month = month_index(date);
        if last_month == Some(month) {
            continue;
        }
        last_month = Some(month);
        if (month - month_index(first)) % step != 0 {
            continue;
        }
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#ccc" stroke-width="1" />"##,
            y1 = axis_y,
            y2 = axis_y + 4.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = axis_y + 16.0,
            label = date.format("%Y-%m")
        ));
    }
}

fn add_legend(svg: &mut String, series: &[LineSeries<'_>]) {
    let x = PADDING + 10.0;
    let mut y = PADDING + 14.0;
    for entry in series {
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="1.5" /><text x="{tx:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            ly = y - 4.0,
            x2 = x + 20.0,
            color = entry.color,
            tx = x + 26.0,
            label = escape(entry.label)
        ));
        y += 16.0;
    }
}

/// Renders a multi-line chart over `dates` as a standalone SVG document.
///
/// A chart with no defined values still renders its frame, title and legend.
pub fn render_line_chart(
    labels: &ChartLabels<'_>,
    dates: &[NaiveDate],
    series: &[LineSeries<'_>],
    format: ValueFormat,
) -> String {
    let mut svg = svg_header(labels.title);
    let xs = x_positions(dates.len());

    if let Some((min, max)) = extent(series) {
        add_value_axis(&mut svg, min, max, format);
        for line in series {
            for run in segments(&xs, line.values, min, max) {
                svg.push_str(&polyline(&run, line.color));
            }
        }
    }
    add_time_axis(&mut svg, dates, &xs);
    add_axis_titles(&mut svg, labels.x_axis, labels.y_axis);
    add_legend(&mut svg, series);
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(title: &str) -> ChartLabels<'_> {
        ChartLabels { title, x_axis: "Date", y_axis: "Value" }
    }

    fn months(n: u32) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2020 + (i / 12) as i32, i % 12 + 1, 1).unwrap())
            .collect()
    }

    #[test]
    fn test_gap_splits_line_into_segments() {
        let xs = x_positions(5);
        let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)];
        let runs = segments(&xs, &values, 1.0, 4.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1].len(), 2);
        // The highest value sits on the top padding line.
        assert_eq!(runs[1][1].1, PADDING);
    }

    #[test]
    fn test_leading_undefined_cells_are_skipped() {
        let xs = x_positions(4);
        let values = [None, None, Some(0.1), Some(0.2)];
        let runs = segments(&xs, &values, 0.1, 0.2);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0][0].0, xs[2]);
    }

    #[test]
    fn test_flat_extent_is_widened() {
        let values = [Some(1.0), Some(1.0)];
        let line = LineSeries { label: "flat", color: "#000", values: &values };
        assert_eq!(extent(&[line]), Some((0.9, 1.1)));
    }

    #[test]
    fn test_all_undefined_renders_frame_only() {
        let dates = months(3);
        let values = [None, None, None];
        let line = LineSeries { label: "USD/JPY", color: "#348dc1", values: &values };
        let svg = render_line_chart(&labels("Empty"), &dates, &[line], ValueFormat::Percent);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<polyline"));
        assert!(svg.contains("USD/JPY"));
    }

    #[test]
    fn test_time_axis_label_count_is_bounded() {
        let dates = months(120);
        let values: Vec<Option<f64>> = (0..120).map(|i| Some(i as f64)).collect();
        let line = LineSeries { label: "growth", color: "#348dc1", values: &values };
        let svg = render_line_chart(&labels("Ten years"), &dates, &[line], ValueFormat::Multiple);
        let labels = svg.matches(r#"text-anchor="middle">20"#).count();
        assert!(labels <= MAX_TIME_LABELS, "{labels} labels");
        assert!(svg.contains(">2020-01<"));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = render_line_chart(&labels("A & B"), &months(1), &[], ValueFormat::Percent);
        assert!(svg.contains("A &amp; B"));
    }

    #[test]
    fn test_axis_titles_are_rendered() {
        let labels = ChartLabels { title: "T", x_axis: "Date", y_axis: "Drawdown" };
        let svg = render_line_chart(&labels, &months(2), &[], ValueFormat::Percent);
        assert!(svg.contains(r#"class="axis-title">Date</text>"#));
        assert!(svg.contains(r#"rotate(-90"#));
        assert!(svg.contains(">Drawdown</text>"));
    }
}
