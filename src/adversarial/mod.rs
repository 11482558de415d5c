//! Two-player game-tree search over an [`AdversarialGame`](crate::env::AdversarialGame):
//! negamax minimax, alpha-beta pruning, board evaluators and the per-call
//! performance tracker.

mod evaluation;
mod negamax;
mod tracker;

pub use evaluation::{Evaluator, EvaluatorKind, ThreatEvaluator, WindowEvaluator};
pub use negamax::{alphabeta_search, minimax_search};
pub use tracker::{PerformanceTracker, SearchStats};

/// Game-tree search settings for the `[adversarial]` config section.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdversarialConfig {
    /// Plies searched below the root.
    pub max_depth: usize,
    pub evaluator: EvaluatorKind,
}

impl Default for AdversarialConfig {
    fn default() -> Self {
        AdversarialConfig {
            max_depth: 4,
            evaluator: EvaluatorKind::Threats,
        }
    }
}
