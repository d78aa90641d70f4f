//! The cellular automaton: states, rules, configuration and the core engine.

pub mod config;
pub mod engine;
pub mod rule;

pub use config::AutomatonConfig;
pub use engine::SurfaceAutomaton;
pub use rule::{Rule, State};
