//! Periodic sweeps over all configured targets.
//!
//! The scheduler runs one full sweep immediately, then one per configured
//! period, forever. Sweeps execute inline on the timer task, so a sweep that
//! outlasts the period delays the next tick instead of overlapping it.
//!
//! Each target is its own failure boundary: a target whose cycle errors is
//! logged and skipped, and the sweep carries on with the next target in
//! declared order. Nothing a failed sweep did is undone, and the next tick
//! starts from scratch (every cycle re-derives its work from the live feed).

use crate::config::BotConfig;
use crate::publish::run_cycle;
use crate::wiki::WikiClient;
use std::time::{Duration, Instant};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

/// Run the scheduler forever.
///
/// Only process termination stops it; there is no cancellation of an
/// in-flight sweep.
pub async fn run<C: WikiClient>(client: &C, config: &BotConfig) -> ! {
    let mut ticker = time::interval(Duration::from_secs(config.period_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick of a fresh interval fires immediately.
        ticker.tick().await;
        sweep(client, config).await;
    }
}

/// Run one cycle for every target, in declared order.
///
/// Returns per-target outcomes; callers other than tests only care about the
/// logging this produces.
pub async fn sweep<C: WikiClient>(client: &C, config: &BotConfig) -> Vec<bool> {
    let t0 = Instant::now();
    let mut outcomes = Vec::with_capacity(config.targets.len());

    for target in &config.targets {
        match run_cycle(client, target).await {
            Ok(()) => outcomes.push(true),
            Err(e) => {
                error!(
                    page = %target.page_to_purge,
                    error = %e,
                    "Publish cycle failed; continuing with remaining targets"
                );
                outcomes.push(false);
            }
        }
    }

    let failed = outcomes.iter().filter(|ok| !**ok).count();
    info!(
        targets = outcomes.len(),
        failed,
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Sweep complete"
    );
    outcomes
}
