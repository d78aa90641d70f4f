//! Automaton configuration.

use crate::automaton::rule::Rule;
use crate::mesh_error::MeshError;
use crate::unfold::projection::UnfoldOptions;
use serde::{Deserialize, Serialize};

/// Construction-time settings for a [`SurfaceAutomaton`](crate::automaton::SurfaceAutomaton).
///
/// Every field has a default, so a partial JSON/RON document deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    pub rule: Rule,
    /// Chance that each cell starts ON.
    pub initial_on_probability: f64,
    /// Seed for the initial state when no RNG is injected.
    pub rng_seed: u64,
    pub unfold: UnfoldOptions,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rule: Rule::default(),
            initial_on_probability: 0.7,
            rng_seed: 42,
            unfold: UnfoldOptions::default(),
        }
    }
}

impl AutomatonConfig {
    pub fn validate(&self) -> Result<(), MeshError> {
        check_probability(self.initial_on_probability)?;
        self.unfold.validate()
    }
}

pub(crate) fn check_probability(p: f64) -> Result<(), MeshError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(MeshError::InvalidConfig(format!(
            "initial_on_probability must be within [0, 1], got {p}"
        )))
    }
}
