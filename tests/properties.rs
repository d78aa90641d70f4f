use proptest::prelude::*;
use surface_automata::automaton::{AutomatonConfig, Rule, State, SurfaceAutomaton};
use surface_automata::geometry::Welding;
use surface_automata::mesh_generation::{TorusOptions, icosphere, torus};
use surface_automata::topology::CellMesh;
use surface_automata::unfold::{UnfoldOptions, unfold};

fn state() -> impl Strategy<Value = State> {
    any::<bool>().prop_map(State::from)
}

fn rule() -> impl Strategy<Value = Rule> {
    (
        prop::array::uniform4(state()),
        prop::array::uniform4(state()),
    )
        .prop_map(|(on, off)| Rule::new(on, off))
}

fn torus_options() -> impl Strategy<Value = TorusOptions> {
    (3usize..9, 2usize..6).prop_map(|(nu, half_nv)| TorusOptions {
        nu,
        nv: 2 * half_nv,
        ..TorusOptions::default()
    })
}

proptest! {
    #[test]
    fn rule_text_round_trips(r in rule()) {
        prop_assert_eq!(r.to_string().parse::<Rule>().unwrap(), r);
    }

    #[test]
    fn large_counts_saturate(r in rule(), s in state(), n in 3usize..64) {
        prop_assert_eq!(r.next(s, n), r.next(s, 3));
    }

    #[test]
    fn torus_adjacency_is_symmetric(opts in torus_options()) {
        let cells = CellMesh::from_triangles(&torus(&opts).unwrap(), Welding::Exact).unwrap();
        for cell in cells.cells() {
            prop_assert_eq!(cell.neighbors().len(), 3);
            for &n in cell.neighbors() {
                prop_assert!(cells.neighbors(n).contains(&cell.id()));
            }
        }
    }

    #[test]
    fn torus_unfolds_completely(opts in torus_options(), root in 0usize..24) {
        let cells = CellMesh::from_triangles(&torus(&opts).unwrap(), Welding::Exact).unwrap();
        let options = UnfoldOptions {
            root: surface_automata::topology::CellId::new(root % cells.len()),
            ..UnfoldOptions::default()
        };
        let u = unfold(&cells, &options).unwrap();
        prop_assert!(u.projection.is_complete());
        prop_assert_eq!(u.tree.root(), options.root);
    }

    #[test]
    fn seeded_runs_are_reproducible(seed in any::<u64>(), r in rule(), steps in 0usize..8) {
        let soup = icosphere(1);
        let cfg = AutomatonConfig { rule: r, rng_seed: seed, ..AutomatonConfig::default() };
        let mut a = SurfaceAutomaton::from_triangles(&soup, &cfg).unwrap();
        let mut b = SurfaceAutomaton::from_triangles(&soup, &cfg).unwrap();
        a.advance_by(steps);
        b.advance_by(steps);
        prop_assert_eq!(a.states(), b.states());
        prop_assert_eq!(a.generation(), steps as u64);
    }
}
