//! One population cycle: every task once, in dependency order.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;
use tracing::instrument;

use crate::kind::EntityKind;
use crate::population::*;
use crate::types::PopulationError;

/// What happened to one task during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Persisted(usize),
    Failed(String),
}

/// Per-entity results of a single population cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    outcomes:  BTreeMap<EntityKind, TaskOutcome>,
    cancelled: bool,
}

impl CycleReport {
    pub fn outcome(&self, kind: EntityKind) -> Option<&TaskOutcome> {
        self.outcomes.get(&kind)
    }

    pub fn persisted(&self, kind: EntityKind) -> usize {
        match self.outcomes.get(&kind) {
            Some(TaskOutcome::Persisted(n)) => *n,
            _ => 0,
        }
    }

    pub fn total_persisted(&self) -> usize {
        self.outcomes
            .values()
            .map(|o| match o {
                TaskOutcome::Persisted(n) => *n,
                TaskOutcome::Failed(_) => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        self.outcomes.iter().filter_map(|(kind, o)| match o {
            TaskOutcome::Failed(msg) => Some((*kind, msg.as_str())),
            TaskOutcome::Persisted(_) => None,
        })
    }

    /// Tasks that got to run. Lower than nine only when the cycle was cancelled.
    pub fn tasks_run(&self) -> usize {
        self.outcomes.len()
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    ctx:    PopulationContext,
    cancel: CancellationToken,
}

impl Orchestrator {
    pub fn new(ctx: PopulationContext, cancel: CancellationToken) -> Self {
        Self { ctx, cancel }
    }

    pub fn context(&self) -> &PopulationContext {
        &self.ctx
    }

    /// Run every population task once. A failing task is logged and the cycle moves on to the next one.
    #[instrument(level = "debug", skip_all)]
    pub async fn run_cycle(&self, rng: &mut StdRng) -> CycleReport {
        let mut report = CycleReport::default();

        for kind in EntityKind::POPULATION_ORDER {
            if self.cancel.is_cancelled() {
                info!("Cycle interrupted before {kind}");
                report.cancelled = true;
                break;
            }

            let outcome = match self.run_task(kind, rng).await {
                Ok(n) => TaskOutcome::Persisted(n),
                Err(err) => {
                    error!("Populating {kind} failed: {err}");
                    TaskOutcome::Failed(err.to_string())
                }
            };
            report.outcomes.insert(kind, outcome);
        }

        report
    }

    async fn run_task(&self, kind: EntityKind, rng: &mut StdRng) -> Result<usize, PopulationError> {
        let ctx = &self.ctx;
        match kind {
            EntityKind::Dealer => ctx.populate(&DealerTask, rng).await,
            EntityKind::Customer => ctx.populate(&CustomerTask, rng).await,
            EntityKind::Address => ctx.populate(&AddressTask, rng).await,
            EntityKind::Location => ctx.populate(&LocationTask, rng).await,
            EntityKind::ProductType => ctx.populate(&ProductTypeTask, rng).await,
            EntityKind::Product => ctx.populate(&ProductTask, rng).await,
            EntityKind::CustomerOrder => ctx.populate(&CustomerOrderTask, rng).await,
            EntityKind::OrderDetail => ctx.populate(&OrderDetailTask, rng).await,
            EntityKind::OrderShipping => ctx.populate(&OrderShippingTask, rng).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accounting() {
        let mut report = CycleReport::default();
        report.outcomes.insert(EntityKind::Dealer, TaskOutcome::Persisted(3));
        report.outcomes.insert(EntityKind::Customer, TaskOutcome::Persisted(5));
        report
            .outcomes
            .insert(EntityKind::Address, TaskOutcome::Failed("no Customer rows".into()));

        assert_eq!(report.total_persisted(), 8);
        assert_eq!(report.persisted(EntityKind::Customer), 5);
        assert_eq!(report.persisted(EntityKind::Address), 0);
        assert_eq!(report.persisted(EntityKind::Product), 0);
        assert_eq!(report.tasks_run(), 3);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures, vec![(EntityKind::Address, "no Customer rows")]);
    }
}
