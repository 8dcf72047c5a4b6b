//! Rectangular cell grid and the agent's view square.

use gt_core::Direction;

use crate::{GridError, GridResult, WorldObj};

/// Cell coordinates `(x, y)`; `x` grows East, `y` grows South.
pub type Pos = (usize, usize);

/// Row-major grid of optional objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width:  usize,
    height: usize,
    cells:  Vec<Option<WorldObj>>,
}

impl Grid {
    /// An empty `width × height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![None; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, (x, y): Pos) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn index(&self, (x, y): Pos) -> usize {
        y * self.width + x
    }

    /// Occupant of `pos`; `None` for empty or out-of-range cells.
    pub fn get(&self, pos: Pos) -> Option<&WorldObj> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut WorldObj> {
        if !self.in_bounds(pos) {
            return None;
        }
        let i = self.index(pos);
        self.cells[i].as_mut()
    }

    /// Put `obj` at `pos` (or clear it with `None`).
    pub fn set(&mut self, pos: Pos, obj: Option<WorldObj>) -> GridResult<()> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds {
                x:      pos.0,
                y:      pos.1,
                width:  self.width,
                height: self.height,
            });
        }
        let i = self.index(pos);
        self.cells[i] = obj;
        Ok(())
    }

    /// `true` when `pos` is inside the grid and holds nothing.
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.cells[self.index(pos)].is_none()
    }

    /// Wall cells from `(x, y)` eastwards, clipped at the grid edge.
    pub fn horz_wall(&mut self, x: usize, y: usize, length: usize) {
        if y >= self.height {
            return;
        }
        for cx in x..(x + length).min(self.width) {
            let i = self.index((cx, y));
            self.cells[i] = Some(WorldObj::wall());
        }
    }

    /// Wall cells from `(x, y)` southwards, clipped at the grid edge.
    pub fn vert_wall(&mut self, x: usize, y: usize, length: usize) {
        if x >= self.width {
            return;
        }
        for cy in y..(y + length).min(self.height) {
            let i = self.index((x, cy));
            self.cells[i] = Some(WorldObj::wall());
        }
    }

    /// Outline of the `w × h` rectangle whose top-left cell is `(x, y)`.
    pub fn wall_rect(&mut self, x: usize, y: usize, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        self.horz_wall(x, y, w);
        self.horz_wall(x, y + h - 1, w);
        self.vert_wall(x, y, h);
        self.vert_wall(x + w - 1, y, h);
    }

    /// Every occupied cell, row by row.
    pub fn objects(&self) -> impl Iterator<Item = (Pos, &WorldObj)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|o| ((i % self.width, i / self.width), o)))
    }
}

/// The cell one step ahead of `pos` facing `dir`, if it is not off the
/// top or left edge.
pub fn front_of(pos: Pos, dir: Direction) -> Option<Pos> {
    let (dx, dy) = dir.unit();
    let x = pos.0.checked_add_signed(dx as isize)?;
    let y = pos.1.checked_add_signed(dy as isize)?;
    Some((x, y))
}

/// Whether `target` lies in the `view_size × view_size` square an agent at
/// `agent` facing `dir` observes.  The agent sits at the middle of the
/// square's back edge.  Occlusion is not considered.
pub fn view_contains(agent: Pos, dir: Direction, view_size: usize, target: Pos) -> bool {
    let (ax, ay) = (agent.0 as i64, agent.1 as i64);
    let vs = view_size as i64;
    let half = vs / 2;
    let (top_x, top_y) = match dir {
        Direction::East  => (ax, ay - half),
        Direction::South => (ax - half, ay),
        Direction::West  => (ax - vs + 1, ay - half),
        Direction::North => (ax - half, ay - vs + 1),
    };
    let (tx, ty) = (target.0 as i64, target.1 as i64);
    (top_x..top_x + vs).contains(&tx) && (top_y..top_y + vs).contains(&ty)
}
