use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::shutdown::ShutdownSender;

use super::aggregate::Aggregate;

/// Shortest period the sampler will tick at.
const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(1);

/// Spawns the background task that closes one interval per period.
///
/// The first sample is taken one full period after the call, never
/// immediately. The task stops on the first message (or closure) of the
/// shutdown channel and returns how many samples it took.
#[must_use]
pub fn spawn_interval_sampler(aggregate: Aggregate, shutdown_tx: &ShutdownSender) -> JoinHandle<u64> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    let period = aggregate.interval().max(MIN_SAMPLE_INTERVAL);

    tokio::spawn(async move {
        let first_tick = Instant::now()
            .checked_add(period)
            .unwrap_or_else(Instant::now);
        let mut ticker = tokio::time::interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    let deltas = aggregate.sample().await;
                    ticks = ticks.saturating_add(1);
                    tracing::debug!(
                        tick = ticks,
                        requests = deltas.requests,
                        successes = deltas.successes,
                        throttled = deltas.throttled,
                        "Closed reporting interval"
                    );
                }
            }
        }

        tracing::debug!("Interval sampler stopped after {} ticks", ticks);
        ticks
    })
}
