//! The workload cycle loop.
use std::time::Duration;
use std::time::Instant;

use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::instrument;

use crate::orchestrator::CycleReport;
use crate::orchestrator::Orchestrator;
use crate::workload::WorkloadReport;
use crate::workload::WorkloadRunner;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SchedulerState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum StopReason {
    #[strum(to_string = "duration elapsed")]
    DurationElapsed,
    #[strum(to_string = "interrupted")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleReport {
    pub cycles:        usize,
    pub reason:        StopReason,
    pub elapsed:       Duration,
    pub last_cycle:    Option<CycleReport>,
    pub last_workload: Option<WorkloadReport>,
}

/// The only transition out of RUNNING. Evaluated once per tick, after the sleep.
pub fn next_state(cancelled: bool, elapsed: Duration, duration: Option<Duration>) -> (SchedulerState, Option<StopReason>) {
    if cancelled {
        (SchedulerState::Stopped, Some(StopReason::Cancelled))
    }
    else if duration.is_some_and(|d| elapsed >= d) {
        (SchedulerState::Stopped, Some(StopReason::DurationElapsed))
    }
    else {
        (SchedulerState::Running, None)
    }
}

#[derive(Debug)]
pub struct Scheduler {
    orchestrator: Orchestrator,
    workload:     WorkloadRunner,
    interval:     Duration,
    duration:     Option<Duration>,
    cancel:       CancellationToken,
}

impl Scheduler {
    pub fn new(
        orchestrator: Orchestrator,
        workload: WorkloadRunner,
        interval: Duration,
        duration: Option<Duration>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            orchestrator,
            workload,
            interval,
            duration,
            cancel,
        }
    }

    /// Run ticks until the duration is reached or the token is cancelled. Without a duration only cancellation stops
    /// the loop.
    #[instrument(level = "debug", skip_all)]
    pub async fn run(&self, rng: &mut StdRng) -> ScheduleReport {
        let started = Instant::now();
        let mut state = SchedulerState::Running;
        let mut cycles = 0;
        let mut last_cycle = None;
        let mut last_workload = None;
        let mut reason = StopReason::Cancelled;

        match self.duration {
            Some(d) => info!("Running workload cycles for {}s", d.as_secs()),
            None => info!("Running workload cycles until interrupted"),
        }

        while state == SchedulerState::Running {
            cycles += 1;
            info!("Starting cycle {cycles}");

            let cycle = self.orchestrator.run_cycle(rng).await;
            info!(
                "Cycle {cycles} populated {} records",
                cycle.total_persisted()
            );
            last_cycle = Some(cycle);

            if !self.cancel.is_cancelled() {
                last_workload = Some(self.workload.run().await);
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {}
                _ = tokio::time::sleep(self.interval) => {}
            }

            let (next, stop) = next_state(self.cancel.is_cancelled(), started.elapsed(), self.duration);
            state = next;
            if let Some(stop) = stop {
                reason = stop;
            }
        }

        let elapsed = started.elapsed();
        info!("Stopped after {cycles} cycles ({reason}) in {:.1}s", elapsed.as_secs_f64());

        ScheduleReport {
            cycles,
            reason,
            elapsed,
            last_cycle,
            last_workload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_forever_without_duration() {
        let (state, reason) = next_state(false, Duration::from_secs(86_400 * 365), None);
        assert_eq!(state, SchedulerState::Running);
        assert_eq!(reason, None);
    }

    #[test]
    fn test_stops_once_duration_is_reached() {
        let d = Some(Duration::from_secs(60));
        assert_eq!(
            next_state(false, Duration::from_secs(59), d),
            (SchedulerState::Running, None)
        );
        assert_eq!(
            next_state(false, Duration::from_secs(60), d),
            (SchedulerState::Stopped, Some(StopReason::DurationElapsed))
        );
        assert_eq!(
            next_state(false, Duration::from_secs(61), d),
            (SchedulerState::Stopped, Some(StopReason::DurationElapsed))
        );
    }

    #[test]
    fn test_cancellation_wins() {
        assert_eq!(
            next_state(true, Duration::ZERO, Some(Duration::from_secs(60))),
            (SchedulerState::Stopped, Some(StopReason::Cancelled))
        );
        assert_eq!(
            next_state(true, Duration::ZERO, None),
            (SchedulerState::Stopped, Some(StopReason::Cancelled))
        );
    }
}
