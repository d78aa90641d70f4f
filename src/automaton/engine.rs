//! The automaton core.
//!
//! Each tick runs in two phases. [`SurfaceAutomaton::tick`] computes every
//! cell's pending state from the *current* states only, and
//! [`SurfaceAutomaton::commit`] then copies pending into current for all
//! cells at once. No state is mutated while neighbour counts are read, so
//! every count within a tick sees one consistent snapshot.
//!
//! The unfolding (spanning tree + projection) is built on first use and
//! cached for the automaton's lifetime; a new mesh means a new automaton.

use crate::automaton::config::{AutomatonConfig, check_probability};
use crate::automaton::rule::{Rule, State};
use crate::geometry::key::Welding;
use crate::geometry::vector::{Point2, Triangle};
use crate::mesh_error::MeshError;
use crate::topology::cell::{Cell, CellMesh};
use crate::topology::ids::CellId;
use crate::unfold::projection::{Projection, UnfoldOptions, Unfolding, unfold};
use crate::unfold::spanning_tree::SpanningTree;
use once_cell::unsync::OnceCell;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A binary cellular automaton over the cells of a triangle mesh.
#[derive(Debug, Clone)]
pub struct SurfaceAutomaton {
    cells: CellMesh,
    state: Vec<State>,
    pending: Vec<State>,
    rule: Rule,
    unfold_options: UnfoldOptions,
    generation: u64,
    unfolding: OnceCell<Unfolding>,
}

impl SurfaceAutomaton {
    /// Build an automaton whose initial state is drawn from `config.rng_seed`.
    pub fn new(cells: CellMesh, config: &AutomatonConfig) -> Result<Self, MeshError> {
        let mut rng = SmallRng::seed_from_u64(config.rng_seed);
        Self::with_rng(cells, config, &mut rng)
    }

    /// Build an automaton drawing its initial state from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        cells: CellMesh,
        config: &AutomatonConfig,
        rng: &mut R,
    ) -> Result<Self, MeshError> {
        config.validate()?;
        let n = cells.len();
        let mut automaton = Self {
            cells,
            state: vec![State::Off; n],
            pending: vec![State::Off; n],
            rule: config.rule,
            unfold_options: config.unfold,
            generation: 0,
            unfolding: OnceCell::new(),
        };
        automaton.randomize(config.initial_on_probability, rng)?;
        log::info!(
            "automaton over {} cells, rule {}, {} initially on",
            n,
            automaton.rule,
            automaton.on_count()
        );
        Ok(automaton)
    }

    /// Weld `triangles` exactly, build adjacency and the automaton in one go.
    pub fn from_triangles(triangles: &[Triangle], config: &AutomatonConfig) -> Result<Self, MeshError> {
        Self::new(CellMesh::from_triangles(triangles, Welding::Exact)?, config)
    }

    /// Cells in stable id order.
    pub fn cells(&self) -> &[Cell] {
        self.cells.cells()
    }

    pub fn cell_mesh(&self) -> &CellMesh {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// 3D corners of `cell` in winding order.
    pub fn vertices(&self, cell: CellId) -> Option<Triangle> {
        self.cells.vertices(cell)
    }

    pub fn state(&self, cell: CellId) -> Option<State> {
        self.state.get(cell.index()).copied()
    }

    /// Current states, indexed by cell id.
    pub fn states(&self) -> &[State] {
        &self.state
    }

    /// States staged by the last [`tick`](Self::tick), indexed by cell id.
    pub fn pending_states(&self) -> &[State] {
        &self.pending
    }

    /// Overwrite the state of `cell`.
    ///
    /// The edit is written to the staged buffer as well, so a following
    /// [`commit`](Self::commit) keeps it even without a fresh `tick`.
    pub fn set_state(&mut self, cell: CellId, state: State) -> Result<(), MeshError> {
        let i = cell.index();
        if i >= self.state.len() {
            return Err(MeshError::UnknownCell(cell));
        }
        self.state[i] = state;
        self.pending[i] = state;
        Ok(())
    }

    /// Flip `cell` and return its new state.
    pub fn toggle(&mut self, cell: CellId) -> Result<State, MeshError> {
        let next = self
            .state(cell)
            .ok_or(MeshError::UnknownCell(cell))?
            .toggled();
        self.set_state(cell, next)?;
        Ok(next)
    }

    /// Number of ON neighbours of `cell` in the current state.
    pub fn on_neighbors(&self, cell: CellId) -> usize {
        self.cells
            .neighbors(cell)
            .iter()
            .filter(|n| self.state[n.index()].is_on())
            .count()
    }

    /// Number of ON cells.
    pub fn on_count(&self) -> usize {
        self.state.iter().filter(|s| s.is_on()).count()
    }

    /// Number of commits since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Replace the rule; current states are kept.
    pub fn set_rule(&mut self, rule: Rule) {
        if rule != self.rule {
            log::info!("rule changed {} -> {}", self.rule, rule);
        }
        self.rule = rule;
    }

    /// Phase one: stage every cell's next state from the current states.
    pub fn tick(&mut self) {
        let Self {
            cells,
            state,
            pending,
            rule,
            ..
        } = self;
        for (cell, next) in cells.cells().iter().zip(pending.iter_mut()) {
            let on = cell
                .neighbors()
                .iter()
                .filter(|n| state[n.index()].is_on())
                .count();
            *next = rule.next(state[cell.id().index()], on);
        }
    }

    /// Phase two: make every staged state current.
    pub fn commit(&mut self) {
        self.state.copy_from_slice(&self.pending);
        self.generation += 1;
    }

    /// `tick` followed by `commit`.
    pub fn advance(&mut self) {
        self.tick();
        self.commit();
    }

    pub fn advance_by(&mut self, steps: usize) {
        for _ in 0..steps {
            self.advance();
        }
    }

    /// Turn every cell OFF. The generation counter is kept.
    pub fn clear(&mut self) {
        self.state.fill(State::Off);
        self.pending.fill(State::Off);
    }

    /// Set each cell ON independently with probability `p`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, p: f64, rng: &mut R) -> Result<(), MeshError> {
        check_probability(p)?;
        for s in &mut self.state {
            *s = State::from(rng.gen_bool(p));
        }
        self.pending.copy_from_slice(&self.state);
        Ok(())
    }

    /// Build (once) and return the unfolding.
    pub fn unfold(&self) -> Result<&Unfolding, MeshError> {
        self.unfolding
            .get_or_try_init(|| unfold(&self.cells, &self.unfold_options))
    }

    /// The projection, if [`unfold`](Self::unfold) has run.
    pub fn projection(&self) -> Option<&Projection> {
        self.unfolding.get().map(|u| &u.projection)
    }

    /// The spanning tree, if [`unfold`](Self::unfold) has run.
    pub fn spanning_tree(&self) -> Option<&SpanningTree> {
        self.unfolding.get().map(|u| &u.tree)
    }

    /// Cell under `p` in the unfolding, building the unfolding if needed.
    pub fn locate(&self, p: Point2) -> Result<Option<CellId>, MeshError> {
        Ok(self.unfold()?.projection.locate(p))
    }
}
