use std::path::PathBuf;

use tokio::io::{AsyncBufRead, BufReader};
use tokio::sync::mpsc;

use crate::args::{AggregatorArgs, OutputFormat, STDIN_INPUT};
use crate::error::{AppError, AppResult, MetricsError};
use crate::metrics::{ClassifiedOutcome, ResultAggregator};
use crate::report::Report;
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;

use super::failures::spawn_failure_sink;
use super::progress::spawn_progress_reporter;
use super::source::read_outcomes;

type OutcomeInput = Box<dyn AsyncBufRead + Unpin + Send>;

/// Reads outcomes until the input ends or a signal arrives, then prints the
/// final report to stdout.
pub(crate) async fn run(args: AggregatorArgs) -> AppResult<()> {
    let input = open_input(&args.input).await?;

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let (inbound_tx, inbound_rx) = mpsc::channel::<ClassifiedOutcome>(args.inbound_capacity.get());
    let (failure_tx, failure_rx) = mpsc::channel::<ClassifiedOutcome>(args.failure_capacity.get());
    let sink_handle = spawn_failure_sink(failure_rx, args.failures_out.as_ref().map(PathBuf::from));

    let aggregator = ResultAggregator::new(args.interval, inbound_rx, Some(failure_tx)).spawn();
    let progress_handle = args.report_interval.map(|period| {
        spawn_progress_reporter(aggregator.aggregate(), period, args.no_color, &shutdown_tx)
    });

    let read_result = read_outcomes(input, inbound_tx, &shutdown_tx).await;
    let finished = aggregator.finish().await?;

    drop(shutdown_tx.send(()));
    signal_handle.await?;
    if let Some(handle) = progress_handle {
        handle.await?;
    }
    let sink_result = sink_handle.await?;

    let reader = read_result?;
    tracing::info!(
        lines = reader.lines,
        accepted = reader.accepted,
        skipped = reader.skipped,
        interrupted = reader.interrupted,
        merged = finished.ingest.merged,
        forwarded = finished.ingest.forwarded,
        "Input finished"
    );
    if finished.ingest.unrouted > 0 {
        tracing::warn!(
            "{} failures could not be forwarded to the failure sink",
            finished.ingest.unrouted
        );
    }

    let report = Report::capture(&finished.aggregate).await;
    match args.output_format {
        OutputFormat::Text => {
            for line in report.text_lines() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    let handled = sink_result?;
    tracing::debug!("Failure sink handled {} records", handled);
    Ok(())
}

async fn open_input(input: &str) -> AppResult<OutcomeInput> {
    if input == STDIN_INPUT {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let path = PathBuf::from(input);
    let file = tokio::fs::File::open(&path).await.map_err(|err| {
        AppError::metrics(MetricsError::OpenInput {
            path: path.clone(),
            source: err,
        })
    })?;
    Ok(Box::new(BufReader::new(file)))
}
