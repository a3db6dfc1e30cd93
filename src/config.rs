//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::pose::HeuristicKind;
use crate::solver::{SearchStrategy, Strategy};

/// Everything a caller chooses before a run starts. Immutable for the duration of the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Frontier ordering
    pub strategy: Strategy,

    /// Distance estimate for greedy and A* (ignored by uniform-cost)
    pub heuristic: HeuristicKind,

    /// Maximum steps taken by a single `run` call (none = unbounded)
    pub step_budget: Option<usize>,

    /// Fail immediately when the goal is on another walkable component
    pub precheck_reachability: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::UniformCost,
            heuristic: HeuristicKind::Manhattan,
            step_budget: None,
            precheck_reachability: false,
        }
    }
}

impl SearchConfig {
    pub fn new(strategy: Strategy, heuristic: HeuristicKind) -> Self {
        Self {
            strategy,
            heuristic,
            ..Default::default()
        }
    }

    pub fn solver(&self) -> Box<dyn SearchStrategy> {
        self.strategy.solver(self.heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"strategy": "astar"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::AStar);
        assert_eq!(config.heuristic, HeuristicKind::Manhattan);
        assert_eq!(config.step_budget, None);
        assert!(!config.precheck_reachability);
        assert_eq!(config.solver().name(), "astar");
    }

    #[test]
    fn serializes_round_trip() {
        let config = SearchConfig {
            step_budget: Some(100),
            ..SearchConfig::new(Strategy::Greedy, HeuristicKind::Euclidean)
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""heuristic":"euclidean""#));
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
