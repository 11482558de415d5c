use std::collections::HashSet;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Outcome of a pathfinding run. Immutable once built.
#[derive(Debug, Clone)]
pub struct SearchResult<S, A> {
    success: bool,
    path: Vec<S>,
    actions: Vec<A>,
    nodes_expanded: usize,
    nodes_generated: usize,
    path_cost: f64,
    runtime: Duration,
    memory_peak: f64,
    visited_states: HashSet<S>,
}

/// Flat, serializable view of a [`SearchResult`] for reports.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResultSummary {
    pub success: bool,
    pub path_length: usize,
    pub path_cost: f64,
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    /// Seconds.
    pub runtime: f64,
    /// Megabytes.
    pub memory_peak: f64,
    pub visited_count: usize,
}

impl<S, A> SearchResult<S, A> {
    pub fn success(&self) -> bool {
        self.success
    }

    /// States from the initial state to the goal; empty on failure.
    pub fn path(&self) -> &[S] {
        &self.path
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    pub fn nodes_generated(&self) -> usize {
        self.nodes_generated
    }

    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    pub fn runtime(&self) -> Duration {
        self.runtime
    }

    /// Estimated peak memory held by the search structures, in megabytes.
    pub fn memory_peak(&self) -> f64 {
        self.memory_peak
    }

    pub fn visited_states(&self) -> &HashSet<S> {
        &self.visited_states
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            success: self.success,
            path_length: self.path.len(),
            path_cost: self.path_cost,
            nodes_expanded: self.nodes_expanded,
            nodes_generated: self.nodes_generated,
            runtime: self.runtime.as_secs_f64(),
            memory_peak: self.memory_peak,
            visited_count: self.visited_states.len(),
        }
    }
}

/// A reconstructed solution.
#[derive(Debug, Clone)]
pub(crate) struct Solution<S, A> {
    pub path: Vec<S>,
    pub actions: Vec<A>,
    pub cost: f64,
}

/// Counters, clock and memory high-water mark shared by every engine.
#[derive(Debug)]
pub(crate) struct Meter {
    algorithm: &'static str,
    started: Instant,
    pub expanded: usize,
    pub generated: usize,
    peak_bytes: usize,
}

impl Meter {
    pub fn start(algorithm: &'static str) -> Self {
        debug!(algorithm, "search started");
        Meter {
            algorithm,
            started: Instant::now(),
            expanded: 0,
            generated: 0,
            peak_bytes: 0,
        }
    }

    /// Record the current footprint; only the maximum is kept.
    pub fn observe(&mut self, bytes: usize) {
        self.peak_bytes = self.peak_bytes.max(bytes);
    }

    pub fn finish<S: Eq + Hash, A>(
        self,
        solution: Option<Solution<S, A>>,
        visited: HashSet<S>,
    ) -> SearchResult<S, A> {
        let runtime = self.started.elapsed();
        let (success, path, actions, path_cost) = match solution {
            Some(s) => (true, s.path, s.actions, s.cost),
            None => (false, Vec::new(), Vec::new(), 0.0),
        };
        debug!(
            algorithm = self.algorithm,
            success,
            expanded = self.expanded,
            generated = self.generated,
            path_cost,
            elapsed_ms = runtime.as_secs_f64() * 1000.0,
            "search finished"
        );
        SearchResult {
            success,
            path,
            actions,
            nodes_expanded: self.expanded,
            nodes_generated: self.generated,
            path_cost,
            runtime,
            memory_peak: self.peak_bytes as f64 / BYTES_PER_MB,
            visited_states: visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_has_empty_path_and_zero_cost() {
        let mut meter = Meter::start("test");
        meter.expanded = 3;
        meter.generated = 4;
        let result: SearchResult<u32, char> = meter.finish(None, HashSet::from([1, 2]));
        assert!(!result.success());
        assert!(result.path().is_empty());
        assert!(result.actions().is_empty());
        assert_eq!(result.path_cost(), 0.0);
        assert_eq!(result.nodes_expanded(), 3);
        assert_eq!(result.summary().visited_count, 2);
    }

    #[test]
    fn summary_reports_path_length() {
        let mut meter = Meter::start("test");
        meter.observe(2 * 1024 * 1024);
        meter.observe(1024);
        let solution = Solution {
            path: vec![0u32, 1, 2],
            actions: vec!['a', 'b'],
            cost: 2.0,
        };
        let result = meter.finish(Some(solution), HashSet::new());
        let summary = result.summary();
        assert!(summary.success);
        assert_eq!(summary.path_length, 3);
        assert_eq!(summary.path_cost, 2.0);
        assert!((summary.memory_peak - 2.0).abs() < 1e-9);
    }

    #[test]
    fn summary_serializes_to_json() {
        let result: SearchResult<u32, char> = Meter::start("test").finish(None, HashSet::new());
        let json = serde_json::to_value(result.summary()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["path_length"], 0);
    }
}
