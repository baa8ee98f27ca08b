use std::time::Duration;

use crate::metrics::{CONSISTENCY_REQUEST_MULTIPLIER, SummarySnapshot};

const HEADER: [&str; 3] = ["Metric", "Count", ""];
/// Spaces between table columns.
const COLUMN_GAP: usize = 2;
const MS_PER_SEC: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
    pub note: String,
}

impl SummaryRow {
    fn new(metric: impl Into<String>, value: impl ToString) -> Self {
        Self {
            metric: metric.into(),
            value: value.to_string(),
            note: String::new(),
        }
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Renders a tenths value with exactly one decimal place.
#[must_use]
pub fn format_x10(value_x10: u64) -> String {
    format!("{}.{}", value_x10 / 10, value_x10 % 10)
}

fn interval_label(interval_ms: u64) -> String {
    if interval_ms % MS_PER_SEC == 0 {
        format!("{}s", interval_ms / MS_PER_SEC)
    } else {
        format!("{}ms", interval_ms)
    }
}

#[must_use]
pub fn summary_rows(summary: &SummarySnapshot) -> Vec<SummaryRow> {
    let totals = &summary.totals;
    let current = &summary.current;
    let per = interval_label(summary.interval_ms);

    vec![
        SummaryRow::new("# Requests", totals.requests),
        SummaryRow::new("# Test Success", totals.successes),
        SummaryRow::new("# Test Failures", totals.failures),
        SummaryRow::new("# 5XX Errors", totals.status_5xx),
        SummaryRow::new("# Throttled", totals.throttled),
        SummaryRow::new(format!("# Current THROTTLE/{}", per), current.throttled),
        SummaryRow::new(format!("# Current GET/{}", per), current.gets),
        SummaryRow::new(format!("# Current PUT/{}", per), current.puts),
        SummaryRow::new(format!("# Current DELETE/{}", per), current.deletes),
        SummaryRow::new(format!("# Current CONSISTENCY/{}", per), current.consistency)
            .with_note(format!(
                "({} requests per check)",
                CONSISTENCY_REQUEST_MULTIPLIER
            )),
        SummaryRow::new(format!("Current req/{}", per), current.requests),
        SummaryRow::new(format!("Current Successful req/{}", per), current.successes),
        SummaryRow::new("Average req/sec", format_x10(summary.avg_rps_x10)),
        SummaryRow::new(
            "Average Successful req/sec",
            format_x10(summary.avg_success_rps_x10),
        ),
    ]
}

/// Left-aligned plain-text table with a header row.
#[must_use]
pub fn render_rows(rows: &[SummaryRow]) -> Vec<String> {
    let [metric_header, value_header, note_header] = HEADER;
    let metric_width = rows
        .iter()
        .map(|row| row.metric.len())
        .chain(std::iter::once(metric_header.len()))
        .max()
        .unwrap_or(0)
        .saturating_add(COLUMN_GAP);
    let value_width = rows
        .iter()
        .map(|row| row.value.len())
        .chain(std::iter::once(value_header.len()))
        .max()
        .unwrap_or(0)
        .saturating_add(COLUMN_GAP);

    let mut lines = Vec::with_capacity(rows.len().saturating_add(1));
    lines.push(render_line(
        metric_header,
        value_header,
        note_header,
        metric_width,
        value_width,
    ));
    for row in rows {
        lines.push(render_line(
            &row.metric,
            &row.value,
            &row.note,
            metric_width,
            value_width,
        ));
    }
    lines
}

fn render_line(
    metric: &str,
    value: &str,
    note: &str,
    metric_width: usize,
    value_width: usize,
) -> String {
    let line = format!(
        "{:<metric_width$}{:<value_width$}{}",
        metric,
        value,
        note,
        metric_width = metric_width,
        value_width = value_width
    );
    line.trim_end().to_owned()
}

/// Elapsed header plus the rendered summary table.
#[must_use]
pub fn summary_lines(summary: &SummarySnapshot) -> Vec<String> {
    let elapsed = Duration::from_millis(summary.elapsed_ms);
    let mut lines = vec![format!(
        "Elapsed: {}.{:03}s",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    )];
    lines.extend(render_rows(&summary_rows(summary)));
    lines
}
