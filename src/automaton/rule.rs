//! Cell states and the transition rule.
//!
//! A rule is a pair of four-entry tables indexed by the number of ON
//! neighbours (0–3): `on` is consulted when the cell is currently ON and
//! `off` when it is OFF. The textual form lists both tables as bit strings,
//! `"<on>/<off>"`, e.g. the default `"0110/0110"`.

use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binary cell state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum State {
    #[default]
    Off,
    On,
}

impl State {
    #[inline]
    pub fn is_on(self) -> bool {
        self == State::On
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            State::Off => State::On,
            State::On => State::Off,
        }
    }

    fn bit(self) -> char {
        if self.is_on() { '1' } else { '0' }
    }
}

impl From<bool> for State {
    fn from(on: bool) -> Self {
        if on { State::On } else { State::Off }
    }
}

impl From<State> for bool {
    fn from(s: State) -> bool {
        s.is_on()
    }
}

/// Largest neighbour count a rule table covers.
pub const MAX_NEIGHBORS: usize = 3;

/// Transition tables indexed by ON-neighbour count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// Next state of a cell that is currently ON.
    pub on: [State; 4],
    /// Next state of a cell that is currently OFF.
    pub off: [State; 4],
}

impl Default for Rule {
    fn default() -> Self {
        use State::{Off, On};
        Rule::new([Off, On, On, Off], [Off, On, On, Off])
    }
}

impl Rule {
    pub const fn new(on: [State; 4], off: [State; 4]) -> Self {
        Self { on, off }
    }

    /// Build from 0/1 tables; any other value is rejected.
    pub fn from_bits(on: [u8; 4], off: [u8; 4]) -> Result<Self, MeshError> {
        fn table(bits: [u8; 4], name: &str) -> Result<[State; 4], MeshError> {
            let mut out = [State::Off; 4];
            for (i, (slot, b)) in out.iter_mut().zip(bits).enumerate() {
                *slot = match b {
                    0 => State::Off,
                    1 => State::On,
                    other => {
                        return Err(MeshError::InvalidRule(format!(
                            "{name}[{i}] = {other}, expected 0 or 1"
                        )));
                    }
                };
            }
            Ok(out)
        }
        Ok(Self::new(table(on, "on")?, table(off, "off")?))
    }

    /// Next state given the current state and the number of ON neighbours.
    ///
    /// Counts above 3 only occur on invalid meshes and saturate to entry 3.
    #[inline]
    pub fn next(&self, state: State, on_neighbors: usize) -> State {
        let n = on_neighbors.min(MAX_NEIGHBORS);
        match state {
            State::On => self.on[n],
            State::Off => self.off[n],
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on: String = self.on.iter().map(|s| s.bit()).collect();
        let off: String = self.off.iter().map(|s| s.bit()).collect();
        write!(f, "{on}/{off}")
    }
}

impl FromStr for Rule {
    type Err = MeshError;

    /// Parses `"<on>/<off>"`; a single table applies to both states.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn table(s: &str) -> Result<[u8; 4], MeshError> {
            let bits: Vec<u8> = s
                .trim()
                .chars()
                .map(|c| match c {
                    '0' => Ok(0),
                    '1' => Ok(1),
                    other => Err(MeshError::InvalidRule(format!(
                        "unexpected character {other:?} in rule table"
                    ))),
                })
                .collect::<Result<_, _>>()?;
            <[u8; 4]>::try_from(bits.as_slice()).map_err(|_| {
                MeshError::InvalidRule(format!(
                    "rule table {:?} must have 4 entries, got {}",
                    s.trim(),
                    bits.len()
                ))
            })
        }
        match s.split_once('/') {
            Some((on, off)) => Rule::from_bits(table(on)?, table(off)?),
            None => {
                let t = table(s)?;
                Rule::from_bits(t, t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use State::{Off, On};

    #[test]
    fn default_rule_table() {
        let r = Rule::default();
        assert_eq!(r.to_string(), "0110/0110");
        for (n, want) in [Off, On, On, Off].into_iter().enumerate() {
            assert_eq!(r.next(On, n), want);
            assert_eq!(r.next(Off, n), want);
        }
    }

    #[test]
    fn on_and_off_tables_are_distinct() {
        let r: Rule = "1111/0000".parse().unwrap();
        assert_eq!(r.next(On, 0), On);
        assert_eq!(r.next(Off, 3), Off);
    }

    #[test]
    fn counts_above_three_saturate() {
        let r: Rule = "0001/0000".parse().unwrap();
        assert_eq!(r.next(On, 7), On);
    }

    #[test]
    fn parse_single_table_and_whitespace() {
        let r: Rule = " 1001 ".parse().unwrap();
        assert_eq!(r.on, r.off);
        assert_eq!(r.to_string(), "1001/1001");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!("01/0110".parse::<Rule>(), Err(MeshError::InvalidRule(_))));
        assert!(matches!("0120/0110".parse::<Rule>(), Err(MeshError::InvalidRule(_))));
        assert!(matches!(Rule::from_bits([0, 1, 2, 0], [0; 4]), Err(MeshError::InvalidRule(_))));
    }

    #[test]
    fn state_conversions() {
        assert_eq!(State::from(true), On);
        assert!(!bool::from(Off));
        assert_eq!(On.toggled(), Off);
        assert_eq!(State::default(), Off);
    }

    #[test]
    fn serde_round_trip() {
        let r: Rule = "0111/1000".parse().unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
