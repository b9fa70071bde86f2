//! Explicitly passed instrumentation for the relaxation loop.
//!
//! Every analysis has a `*_with_probe` variant taking `&mut dyn Probe`; the
//! plain entry points pass [`NoProbe`]. Hooks default to no-ops so a sink
//! only implements what it records. Nothing here is global: two analyses
//! running on different threads each carry their own sink.

use serde::Serialize;

use crate::graph::VertexId;

/// How a single-source run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RunOutcome {
    /// A relaxation round made no update before the round bound.
    Converged { rounds: usize },
    /// All `N - 1` rounds ran and the verification pass found no cycle.
    Exhausted { rounds: usize },
    /// The verification pass found an edge that still relaxes.
    NegativeCycle { rounds: usize },
    /// Distances settled, but at least one lies outside the `i64` range.
    DistanceOverflow { rounds: usize },
}

/// Observer for Bellman-Ford runs.
pub trait Probe {
    fn run_started(&mut self, _source: VertexId) {}

    /// Called once per adjacency entry examined, including the
    /// verification pass.
    fn edge_scanned(&mut self) {}

    /// `distance` is the improved value, which may lie outside the
    /// [`Weight`](crate::graph::Weight) range while rounds are still running.
    fn relaxed(&mut self, _from: VertexId, _to: VertexId, _distance: i128) {}

    fn round_finished(&mut self, _source: VertexId, _round: usize, _updates: usize) {}

    fn run_finished(&mut self, _source: VertexId, _outcome: RunOutcome) {}
}

/// Sink that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl Probe for NoProbe {}

/// Aggregate counters across any number of runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelaxationCounters {
    /// Single-source runs started.
    pub runs: u64,
    /// Relaxation rounds completed (verification passes excluded).
    pub rounds: u64,
    /// Adjacency entries examined.
    pub edge_scans: u64,
    /// Successful distance improvements.
    pub relaxations: u64,
    /// Runs that stopped on a zero-update round.
    pub early_exits: u64,
    /// Runs that failed the verification pass.
    pub negative_cycles: u64,
}

impl Probe for RelaxationCounters {
    fn run_started(&mut self, _source: VertexId) {
        self.runs += 1;
    }

    fn edge_scanned(&mut self) {
        self.edge_scans += 1;
    }

    fn relaxed(&mut self, _from: VertexId, _to: VertexId, _distance: i128) {
        self.relaxations += 1;
    }

    fn round_finished(&mut self, _source: VertexId, _round: usize, _updates: usize) {
        self.rounds += 1;
    }

    fn run_finished(&mut self, _source: VertexId, outcome: RunOutcome) {
        match outcome {
            RunOutcome::Converged { .. } => self.early_exits += 1,
            RunOutcome::NegativeCycle { .. } => self.negative_cycles += 1,
            RunOutcome::Exhausted { .. } | RunOutcome::DistanceOverflow { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_tally_hooks() {
        let mut c = RelaxationCounters::default();
        c.run_started(0);
        c.edge_scanned();
        c.edge_scanned();
        c.relaxed(0, 1, 3);
        c.round_finished(0, 1, 1);
        c.run_finished(0, RunOutcome::Converged { rounds: 1 });
        c.run_finished(0, RunOutcome::NegativeCycle { rounds: 2 });

        assert_eq!(
            c,
            RelaxationCounters {
                runs: 1,
                rounds: 1,
                edge_scans: 2,
                relaxations: 1,
                early_exits: 1,
                negative_cycles: 1,
            }
        );
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(RunOutcome::Exhausted { rounds: 3 }).expect("serializable");
        assert_eq!(json["outcome"], "exhausted");
        assert_eq!(json["rounds"], 3);
    }
}
