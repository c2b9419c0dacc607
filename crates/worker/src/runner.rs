//! Periodic populate loop.

use std::future::Future;
use std::time::Duration;

use neuroscan_pipeline::{populate, Populate, PopulateOptions, PopulateReport};
use tokio::time::MissedTickBehavior;

/// Populate `routine` every `interval` until `shutdown` resolves.
///
/// The first run starts immediately. Shutdown is only observed between runs.
/// Failed runs are logged and retried on the next tick. Returns the number of
/// completed runs.
pub async fn run_periodically<P, F>(
    routine: &P,
    options: &PopulateOptions,
    interval: Duration,
    shutdown: F,
) -> usize
where
    P: Populate + ?Sized,
    F: Future<Output = ()>,
{
    let table = routine.table_name();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut runs = 0;
    loop {
        tokio::select! {
            () = &mut shutdown => {
                tracing::info!(table, runs, "Populate loop stopping");
                return runs;
            }
            _ = ticker.tick() => {
                match populate(routine, options).await {
                    Ok(report) => log_report(table, &report),
                    Err(e) => tracing::error!(table, error = %e, "Populate run failed"),
                }
                runs += 1;
            }
        }
    }
}

fn log_report(table: &str, report: &PopulateReport) {
    if !report.failures.is_empty() {
        tracing::warn!(
            table,
            failed = report.failures.len(),
            "Populate run finished with failing keys"
        );
    }
}
