use rand::SeedableRng;
use rand::rngs::SmallRng;
use surface_automata::automaton::{AutomatonConfig, Rule, State, SurfaceAutomaton};
use surface_automata::geometry::{Triangle, Welding};
use surface_automata::mesh_generation::{TorusOptions, icosphere, torus};
use surface_automata::topology::{CellId, CellMesh};

use State::{Off, On};

fn c(i: usize) -> CellId {
    CellId::new(i)
}

fn tetrahedron() -> Vec<Triangle> {
    let p = [
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ];
    vec![
        [p[0], p[1], p[2]],
        [p[0], p[3], p[1]],
        [p[0], p[2], p[3]],
        [p[1], p[3], p[2]],
    ]
}

fn quiet() -> AutomatonConfig {
    AutomatonConfig {
        initial_on_probability: 0.0,
        ..AutomatonConfig::default()
    }
}

fn history(mut life: SurfaceAutomaton, steps: usize) -> Vec<Vec<State>> {
    (0..steps)
        .map(|_| {
            life.advance();
            life.states().to_vec()
        })
        .collect()
}

#[test]
fn same_seed_same_run() {
    let soup = icosphere(2);
    let cfg = AutomatonConfig {
        rng_seed: 1234,
        ..AutomatonConfig::default()
    };
    let a = SurfaceAutomaton::from_triangles(&soup, &cfg).unwrap();
    let b = SurfaceAutomaton::from_triangles(&soup, &cfg).unwrap();
    assert_eq!(a.states(), b.states());
    assert_eq!(history(a, 20), history(b, 20));
}

#[test]
fn injected_rng_matches_seeded_construction() {
    let soup = torus(&TorusOptions::default()).unwrap();
    let cfg = AutomatonConfig::default();
    let seeded = SurfaceAutomaton::from_triangles(&soup, &cfg).unwrap();
    let cells = CellMesh::from_triangles(&soup, Welding::Exact).unwrap();
    let mut rng = SmallRng::seed_from_u64(cfg.rng_seed);
    let injected = SurfaceAutomaton::with_rng(cells, &cfg, &mut rng).unwrap();
    assert_eq!(seeded.states(), injected.states());
}

#[test]
fn counts_come_from_the_pre_tick_snapshot() {
    // X = 0 neighbours Y = 1 and Z = 2 (and 3); X and Y start ON.
    let mut life = SurfaceAutomaton::from_triangles(&tetrahedron(), &quiet()).unwrap();
    life.set_state(c(0), On).unwrap();
    life.set_state(c(1), On).unwrap();
    assert_eq!(life.on_neighbors(c(0)), 1);
    life.advance();
    // X: 1 ON neighbour -> on[1] = ON. Cell 3 sees X and Y (2) -> off[2] = ON;
    // an in-place sweep would have shown it three ON neighbours instead.
    assert_eq!(life.states(), &[On, On, On, On]);
    life.advance();
    // all cells see 3 ON neighbours -> on[3] = OFF
    assert_eq!(life.on_count(), 0);
    assert_eq!(life.generation(), 2);
}

#[test]
fn lone_triangle_under_default_rule() {
    let t: Vec<Triangle> = vec![[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]];

    let mut off = SurfaceAutomaton::from_triangles(&t, &quiet()).unwrap();
    off.advance_by(3);
    assert_eq!(off.states(), &[Off]);

    let all_on = AutomatonConfig {
        initial_on_probability: 1.0,
        ..AutomatonConfig::default()
    };
    let mut on = SurfaceAutomaton::from_triangles(&t, &all_on).unwrap();
    assert_eq!(on.states(), &[On]);
    // zero neighbours and on[0] = OFF
    on.advance();
    assert_eq!(on.states(), &[Off]);
    on.advance();
    assert_eq!(on.states(), &[Off]);
}

#[test]
fn all_off_is_a_fixed_point_of_the_default_rule() {
    let mut life = SurfaceAutomaton::from_triangles(&icosphere(1), &quiet()).unwrap();
    life.advance_by(10);
    assert_eq!(life.on_count(), 0);
    assert_eq!(life.generation(), 10);
}

#[test]
fn identity_rule_freezes_the_pattern() {
    let mut life =
        SurfaceAutomaton::from_triangles(&icosphere(1), &AutomatonConfig::default()).unwrap();
    let before = life.states().to_vec();
    life.set_rule("1111/0000".parse::<Rule>().unwrap());
    life.advance_by(4);
    assert_eq!(life.states(), before.as_slice());
}

#[test]
fn randomize_and_clear() {
    let mut life = SurfaceAutomaton::from_triangles(&icosphere(1), &quiet()).unwrap();
    let mut rng = SmallRng::seed_from_u64(9);
    life.randomize(1.0, &mut rng).unwrap();
    assert_eq!(life.on_count(), life.len());
    life.advance();
    life.clear();
    assert_eq!(life.on_count(), 0);
    assert_eq!(life.generation(), 1);
    assert!(life.randomize(1.5, &mut rng).is_err());
}
