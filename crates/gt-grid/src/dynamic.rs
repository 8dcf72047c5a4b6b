//! A walled room that changes one cell at a time.

use log::{debug, warn};

use gt_core::{Direction, SimRng};

use crate::grid::{Grid, Pos, view_contains};
use crate::{GridError, GridResult, ObjKind, WorldObj};

/// Upper bound on rejection-sampling draws for any single placement.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Tolerance on the sum of the alteration probabilities.
const PROB_SUM_TOLERANCE: f64 = 1e-9;

pub const MISSION: &str = "get to the green goal square";

/// What one call to [`DynamicMiniGrid::alter`] changed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Alteration {
    StartMoved { from: Pos, to: Pos },
    GoalMoved { from: Pos, to: Pos },
    Placed { kind: ObjKind, pos: Pos },
    Removed { kind: ObjKind, pos: Pos },
}

/// Square room with border walls and a goal, altered between episodes by
/// moving the start or goal or toggling a wall or lava cell.
#[derive(Clone, Debug)]
pub struct DynamicMiniGrid {
    pub size:            usize,
    pub agent_start_pos: Option<Pos>,
    pub agent_start_dir: Direction,
    pub view_size:       usize,
    pub max_steps:       u64,

    grid:      Grid,
    agent_pos: Pos,
    agent_dir: Direction,
    goal_pos:  Pos,
    rng:       SimRng,
}

impl DynamicMiniGrid {
    /// `size × size` room with the agent starting at `(1, 1)` facing East and
    /// a 7-cell view.  The grid is generated immediately.
    pub fn new(size: usize, seed: u64) -> GridResult<Self> {
        Self::with_options(size, Some((1, 1)), Direction::East, 7, seed)
    }

    /// Full constructor.  `agent_start_pos = None` places the agent on a
    /// random free cell with a random heading on every [`gen_grid`](Self::gen_grid).
    pub fn with_options(
        size:            usize,
        agent_start_pos: Option<Pos>,
        agent_start_dir: Direction,
        view_size:       usize,
        seed:            u64,
    ) -> GridResult<Self> {
        if size < 4 {
            return Err(GridError::TooSmall(size));
        }
        let mut env = Self {
            size,
            agent_start_pos,
            agent_start_dir,
            view_size,
            max_steps: 4 * (size * size) as u64,
            grid: Grid::new(size, size),
            agent_pos: (1, 1),
            agent_dir: agent_start_dir,
            goal_pos: (size - 2, size - 2),
            rng: SimRng::new(seed),
        };
        env.gen_grid()?;
        Ok(env)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    pub fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    pub fn goal_pos(&self) -> Pos {
        self.goal_pos
    }

    pub fn mission(&self) -> &'static str {
        MISSION
    }

    /// Whether `pos` is inside the agent's current view square.
    pub fn in_view(&self, pos: Pos) -> bool {
        view_contains(self.agent_pos, self.agent_dir, self.view_size, pos)
    }

    // ── Generation ────────────────────────────────────────────────────────

    /// Rebuild the room: border walls, goal in the bottom-right interior
    /// corner, agent at its start.
    pub fn gen_grid(&mut self) -> GridResult<()> {
        let n = self.size;
        self.grid = Grid::new(n, n);
        self.grid.wall_rect(0, 0, n, n);

        self.goal_pos = (n - 2, n - 2);
        self.grid.set(self.goal_pos, Some(WorldObj::goal()))?;

        match self.agent_start_pos {
            Some(pos) => {
                if !self.is_interior(pos) {
                    return Err(GridError::OutOfBounds { x: pos.0, y: pos.1, width: n, height: n });
                }
                self.agent_pos = pos;
                self.agent_dir = self.agent_start_dir;
            }
            None => {
                let goal = self.goal_pos;
                self.agent_pos = self.sample_interior("agent", |env, p| env.grid.is_empty(p) && p != goal)?;
                self.agent_dir = Direction::from_index(self.rng.gen_range(0..4));
            }
        }
        Ok(())
    }

    // ── Alteration ────────────────────────────────────────────────────────

    /// Apply one random change.  `prob` gives the weights of
    /// `[move start, move goal, toggle wall, toggle lava]`; with
    /// `visibility_check` set, placements that leave the goal inside the
    /// agent's starting view are rejected.
    pub fn alter(&mut self, prob: &[f64], visibility_check: bool) -> GridResult<Alteration> {
        validate_probs(prob)?;

        let u = self.rng.uniform();
        let change = if u < prob[0] {
            self.move_start(visibility_check)
        } else if u < prob[0] + prob[1] {
            self.move_goal(visibility_check)
        } else if u < prob[0] + prob[1] + prob[2] {
            self.set_or_remove(WorldObj::wall())
        } else {
            self.set_or_remove(WorldObj::lava())
        };
        match &change {
            Ok(alteration) => debug!("grid altered: {alteration:?}"),
            Err(e) => warn!("grid alteration failed: {e}"),
        }
        change
    }

    fn move_start(&mut self, visibility_check: bool) -> GridResult<Alteration> {
        let from = self.agent_start_pos.unwrap_or(self.agent_pos);
        let (dir, view, goal) = (self.agent_dir, self.view_size, self.goal_pos);
        let to = self.sample_interior("agent start", |env, p| {
            env.grid.is_empty(p)
                && p != from
                && !(visibility_check && view_contains(p, dir, view, goal))
        })?;
        self.agent_start_pos = Some(to);
        self.agent_pos = to;
        Ok(Alteration::StartMoved { from, to })
    }

    fn move_goal(&mut self, visibility_check: bool) -> GridResult<Alteration> {
        let from = self.goal_pos;
        let start = self.agent_start_pos.unwrap_or(self.agent_pos);
        let to = self.sample_interior("goal", |env, p| {
            env.grid.is_empty(p)
                && p != start
                && p != env.agent_pos
                && !(visibility_check && env.in_view(p))
        })?;
        self.grid.set(to, Some(WorldObj::goal()))?;
        self.grid.set(from, None)?;
        self.goal_pos = to;
        Ok(Alteration::GoalMoved { from, to })
    }

    /// Remove `obj` from a random interior cell if one of its kind is there,
    /// otherwise put it there, replacing whatever else occupied the cell.
    fn set_or_remove(&mut self, obj: WorldObj) -> GridResult<Alteration> {
        let start = self.agent_start_pos.unwrap_or(self.agent_pos);
        let goal = self.goal_pos;
        let pos = self.sample_interior(obj.kind.as_str(), |env, p| {
            p != start && p != goal && p != env.agent_pos
        })?;
        if self.grid.get(pos).is_some_and(|o| o.kind == obj.kind) {
            self.grid.set(pos, None)?;
            Ok(Alteration::Removed { kind: obj.kind, pos })
        } else {
            self.grid.set(pos, Some(obj))?;
            Ok(Alteration::Placed { kind: obj.kind, pos })
        }
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    fn is_interior(&self, (x, y): Pos) -> bool {
        (1..self.size - 1).contains(&x) && (1..self.size - 1).contains(&y)
    }

    fn sample_interior<F>(&mut self, what: &'static str, accept: F) -> GridResult<Pos>
    where
        F: Fn(&Self, Pos) -> bool,
    {
        let hi = self.size - 1;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let p = (self.rng.gen_range(1..hi), self.rng.gen_range(1..hi));
            if accept(&*self, p) {
                return Ok(p);
            }
        }
        Err(GridError::Placement { what, attempts: MAX_PLACEMENT_ATTEMPTS })
    }
}

fn validate_probs(prob: &[f64]) -> GridResult<()> {
    if prob.len() != 4 {
        return Err(GridError::ProbLength { len: prob.len() });
    }
    if let Some((index, &value)) = prob.iter().enumerate().find(|&(_, p)| !(*p >= 0.0)) {
        return Err(GridError::ProbNegative { index, value });
    }
    let sum: f64 = prob.iter().sum();
    if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
        return Err(GridError::ProbSum { sum });
    }
    Ok(())
}
