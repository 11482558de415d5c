//! Agent-versus-obstacle planner.
//!
//! The agent maximizes, an adversary that can drop temporary walls near the
//! agent minimizes. Only every `adversary_frequency`-th generated agent move
//! is answered by the adversary; the rest chain straight into another agent
//! ply.

use std::collections::HashSet;
use std::mem::size_of;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::ObstacleEnvironment;
use crate::error::SearchError;
use crate::maze::HeuristicKind;

use super::result::{Meter, SearchResult, Solution};

/// Score of a goal state before the depth penalty.
const GOAL_VALUE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Plies looked ahead per decision, agent and adversary plies alike.
    pub max_depth: usize,
    /// Chebyshev radius around the agent where walls may be placed.
    pub adversary_radius: usize,
    /// The adversary answers every n-th generated agent move.
    pub adversary_frequency: usize,
    /// Placements considered per adversary ply, not counting "no wall".
    pub candidate_cap: usize,
    /// Prune both plies. The adversary schedule follows the agent moves
    /// actually generated, so with `adversary_frequency > 1` pruning shifts
    /// which plies the adversary answers and can change the route taken.
    pub use_alpha_beta: bool,
    /// Real moves executed before giving up.
    pub max_steps: usize,
    pub heuristic: HeuristicKind,
}

impl Default for HybridConfig {
    fn default() -> Self {
        HybridConfig {
            max_depth: 4,
            adversary_radius: 3,
            adversary_frequency: 2,
            candidate_cap: 10,
            use_alpha_beta: true,
            max_steps: 500,
            heuristic: HeuristicKind::Manhattan,
        }
    }
}

struct Planner<'a, E: ObstacleEnvironment, H> {
    env: E,
    heuristic: &'a H,
    config: &'a HybridConfig,
    meter: Meter,
    visited: HashSet<E::State>,
    /// Agent moves generated so far, across every decision of the run.
    move_count: usize,
}

impl<E, H> Planner<'_, E, H>
where
    E: ObstacleEnvironment,
    H: Fn(&E::State) -> f64,
{
    fn evaluate(&self, state: &E::State, depth: usize) -> f64 {
        if self.env.is_goal_state(state) {
            GOAL_VALUE - depth as f64
        } else {
            -(self.heuristic)(state)
        }
    }

    fn max_value(
        &mut self,
        state: &E::State,
        depth: usize,
        mut alpha: f64,
        beta: f64,
    ) -> (f64, Option<E::Action>) {
        self.meter.expanded += 1;
        self.visited.insert(state.clone());
        if depth >= self.config.max_depth || self.env.is_goal_state(state) {
            return (self.evaluate(state, depth), None);
        }

        let mut value = f64::NEG_INFINITY;
        let mut best = None;
        for (next, action, _) in self.env.successors(state) {
            self.meter.generated += 1;
            self.move_count += 1;
            let child = if self.move_count % self.config.adversary_frequency == 0 {
                self.min_value(&next, depth + 1, alpha, beta)
            } else {
                self.max_value(&next, depth + 1, alpha, beta).0
            };

            if child > value {
                value = child;
                best = Some(action);
            }
            if self.config.use_alpha_beta {
                alpha = alpha.max(value);
                if value >= beta {
                    break;
                }
            }
        }
        (value, best)
    }

    /// The adversary's ply: the agent stays put while a wall is tried.
    fn min_value(&mut self, state: &E::State, depth: usize, alpha: f64, mut beta: f64) -> f64 {
        self.meter.expanded += 1;
        if depth >= self.config.max_depth || self.env.is_goal_state(state) {
            return self.evaluate(state, depth);
        }

        let mut options: Vec<Option<E::Placement>> = self
            .env
            .adversary_actions(state, self.config.adversary_radius)
            .into_iter()
            .take(self.config.candidate_cap)
            .map(Some)
            .collect();
        options.push(None);

        let mut value = f64::INFINITY;
        for option in options {
            self.meter.generated += 1;
            let placed = option.filter(|&p| self.env.add_temporary_wall(p));
            let (reply, _) = self.max_value(state, depth + 1, alpha, beta);
            if let Some(p) = placed {
                self.env.remove_temporary_wall(p);
            }

            value = value.min(reply);
            if self.config.use_alpha_beta {
                beta = beta.min(value);
                if value <= alpha {
                    break;
                }
            }
        }
        value
    }

    fn footprint(&self, path_len: usize) -> usize {
        (self.visited.len() + path_len + self.config.max_depth) * size_of::<E::State>()
    }
}

/// Walks the agent from the initial state, re-planning before every move
/// against an adversary that may block cells near it.
///
/// Runs on a clone of `env`; the adversary's walls only exist during a probe.
/// Fails if the agent reaches no goal within `max_steps` moves or no move
/// scores above negative infinity.
pub fn minmax_search<E, H>(
    env: &E,
    heuristic: H,
    config: &HybridConfig,
) -> Result<SearchResult<E::State, E::Action>, SearchError>
where
    E: ObstacleEnvironment,
    H: Fn(&E::State) -> f64,
{
    if config.adversary_frequency == 0 {
        return Err(SearchError::InvalidParameter(
            "adversary_frequency must be at least 1".to_string(),
        ));
    }

    let mut planner = Planner {
        env: env.clone(),
        heuristic: &heuristic,
        config,
        meter: Meter::start("minmax"),
        visited: HashSet::new(),
        move_count: 0,
    };
    planner.meter.generated = 1;

    let mut current = planner.env.initial_state();
    planner.visited.insert(current.clone());
    let mut path = vec![current.clone()];
    let mut actions = Vec::new();
    let mut cost = 0.0;

    for step in 0..config.max_steps {
        if planner.env.is_goal_state(&current) {
            break;
        }
        let (value, best) = planner.max_value(&current, 0, f64::NEG_INFINITY, f64::INFINITY);
        let Some(action) = best else {
            debug!(step, "no agent move survives the adversary");
            break;
        };
        let Some((next, _, step_cost)) = planner
            .env
            .successors(&current)
            .into_iter()
            .find(|(_, candidate, _)| *candidate == action)
        else {
            break;
        };

        // The probe tree already generated `next`; counting the executed move
        // again keeps generated >= expanded across decisions, since every
        // decision re-expands its root.
        planner.meter.generated += 1;
        debug!(step, ?action, value, "hybrid planner moved");
        cost += step_cost;
        path.push(next.clone());
        actions.push(action);
        current = next;
        planner.meter.observe(planner.footprint(path.len()));
    }

    let success = planner.env.is_goal_state(&current);
    let Planner { meter, visited, .. } = planner;
    let solution = success.then_some(Solution { path, actions, cost });
    Ok(meter.finish(solution, visited))
}
