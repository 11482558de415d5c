use std::time::Instant;

use serde::Serialize;

/// Counters and timer for one game-tree search call.
#[derive(Debug, Clone)]
pub struct PerformanceTracker<A> {
    nodes_expanded: usize,
    nodes_pruned: usize,
    max_depth_reached: usize,
    started: Option<Instant>,
    stopped: Option<Instant>,
    move_sequence: Vec<A>,
}

/// Snapshot of a [`PerformanceTracker`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStats<A> {
    pub nodes_expanded: usize,
    pub nodes_pruned: usize,
    pub max_depth_reached: usize,
    /// Seconds between `start_timer` and `stop_timer`.
    pub time_taken: f64,
    pub move_sequence: Vec<A>,
}

impl<A> Default for PerformanceTracker<A> {
    fn default() -> Self {
        PerformanceTracker {
            nodes_expanded: 0,
            nodes_pruned: 0,
            max_depth_reached: 0,
            started: None,
            stopped: None,
            move_sequence: Vec::new(),
        }
    }
}

impl<A: Clone> PerformanceTracker<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop_timer(&mut self) {
        self.stopped = Some(Instant::now());
    }

    /// Seconds elapsed, or 0 unless the timer was both started and stopped.
    pub fn elapsed_time(&self) -> f64 {
        match (self.started, self.stopped) {
            (Some(start), Some(stop)) => stop.saturating_duration_since(start).as_secs_f64(),
            _ => 0.0,
        }
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    pub fn nodes_pruned(&self) -> usize {
        self.nodes_pruned
    }

    pub fn max_depth_reached(&self) -> usize {
        self.max_depth_reached
    }

    pub fn move_sequence(&self) -> &[A] {
        &self.move_sequence
    }

    pub fn stats(&self) -> SearchStats<A> {
        SearchStats {
            nodes_expanded: self.nodes_expanded,
            nodes_pruned: self.nodes_pruned,
            max_depth_reached: self.max_depth_reached,
            time_taken: self.elapsed_time(),
            move_sequence: self.move_sequence.clone(),
        }
    }

    pub(crate) fn record_node(&mut self, depth: usize) {
        self.nodes_expanded += 1;
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }

    pub(crate) fn record_prune(&mut self) {
        self.nodes_pruned += 1;
    }

    pub(crate) fn record_move(&mut self, action: A) {
        self.move_sequence.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_until_stopped() {
        let mut tracker: PerformanceTracker<usize> = PerformanceTracker::new();
        assert_eq!(tracker.elapsed_time(), 0.0);
        tracker.start_timer();
        assert_eq!(tracker.elapsed_time(), 0.0);
        tracker.stop_timer();
        assert!(tracker.elapsed_time() >= 0.0);
    }

    #[test]
    fn stop_without_start_is_zero() {
        let mut tracker: PerformanceTracker<usize> = PerformanceTracker::new();
        tracker.stop_timer();
        assert_eq!(tracker.elapsed_time(), 0.0);
    }

    #[test]
    fn counters_and_reset() {
        let mut tracker = PerformanceTracker::new();
        tracker.record_node(0);
        tracker.record_node(3);
        tracker.record_node(1);
        tracker.record_prune();
        tracker.record_move(4usize);

        let stats = tracker.stats();
        assert_eq!(stats.nodes_expanded, 3);
        assert_eq!(stats.nodes_pruned, 1);
        assert_eq!(stats.max_depth_reached, 3);
        assert_eq!(stats.move_sequence, vec![4]);

        tracker.reset();
        assert_eq!(tracker.nodes_expanded(), 0);
        assert_eq!(tracker.nodes_pruned(), 0);
        assert!(tracker.move_sequence().is_empty());
    }

    #[test]
    fn stats_serialize() {
        let mut tracker = PerformanceTracker::new();
        tracker.record_move(2usize);
        let json = serde_json::to_value(tracker.stats()).unwrap();
        assert_eq!(json["move_sequence"][0], 2);
        assert_eq!(json["time_taken"], 0.0);
    }
}
