use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::metrics::{Aggregate, SummarySnapshot};
use crate::report::format_x10;
use crate::shutdown::ShutdownSender;

/// Prints a one-line live summary every `period` until shutdown. On a
/// terminal the line is redrawn in place; otherwise it goes to the log.
pub(crate) fn spawn_progress_reporter(
    aggregate: Aggregate,
    period: Duration,
    no_color: bool,
    shutdown_tx: &ShutdownSender,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let on_terminal = std::io::stderr().is_terminal();
        let first_tick = Instant::now()
            .checked_add(period)
            .unwrap_or_else(Instant::now);
        let mut ticker = tokio::time::interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => {
                    if on_terminal && finish_progress_line().is_err() {
                        tracing::debug!("Failed to finish progress line");
                    }
                    break;
                }
                _ = ticker.tick() => {
                    let summary = aggregate.summary().await;
                    if !on_terminal {
                        tracing::info!("{}", progress_text(&summary));
                    } else if render_progress_line(&summary, no_color).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn progress_text(summary: &SummarySnapshot) -> String {
    progress_segments(summary)
        .into_iter()
        .map(|(text, _)| text)
        .collect()
}

fn progress_segments(summary: &SummarySnapshot) -> Vec<(String, Option<Color>)> {
    let elapsed = Duration::from_millis(summary.elapsed_ms);
    vec![
        (
            format!("[{}.{}s] ", elapsed.as_secs(), elapsed.subsec_millis().checked_div(100).unwrap_or(0)),
            None,
        ),
        (
            format!(
                "requests {} ok {} failed {}",
                summary.totals.requests, summary.totals.successes, summary.totals.failures
            ),
            Some(Color::Cyan),
        ),
        (
            format!(" | current {} req", summary.current.requests),
            Some(Color::Yellow),
        ),
        (
            format!(" | avg {} req/sec", format_x10(summary.avg_rps_x10)),
            None,
        ),
    ]
}

fn render_progress_line(summary: &SummarySnapshot, no_color: bool) -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    for (text, color) in progress_segments(summary) {
        match color {
            Some(color) if !no_color => {
                queue!(out, SetForegroundColor(color), Print(&text), ResetColor)?;
            }
            Some(_) | None => queue!(out, Print(&text))?,
        }
    }
    out.flush()?;
    Ok(())
}

fn finish_progress_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
