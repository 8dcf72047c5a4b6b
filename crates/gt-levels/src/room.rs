//! `RoomGrid` — rectangular rooms sharing walls, joined by doors.
//!
//! Rooms are addressed by `(i, j)` = (column, row).  Adjacent rooms share
//! one wall line, so a `num_cols × num_rows` layout of `room_size` rooms is
//! `(room_size - 1) · num_cols + 1` cells wide.  Wall slots are indexed by
//! `Direction::index` (0 East, 1 South, 2 West, 3 North).

use std::collections::HashSet;

use log::debug;

use gt_core::{Direction, SimRng};
use gt_grid::{Color, DoorState, Grid, GridError, MAX_PLACEMENT_ATTEMPTS, ObjKind, Pos, WorldObj, front_of};

use crate::{LevelError, LevelResult};

/// Upper bound on door-adding rounds in [`RoomGrid::connect_all`].
pub const MAX_CONNECT_ITERATIONS: u32 = 5_000;

/// Shape of a room grid.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Layout {
    pub room_size: usize,
    pub num_rows:  usize,
    pub num_cols:  usize,
}

impl Layout {
    /// One room of `room_size`.
    pub fn single(room_size: usize) -> Self {
        Self { room_size, num_rows: 1, num_cols: 1 }
    }

    pub fn width(&self) -> usize {
        (self.room_size - 1) * self.num_cols + 1
    }

    pub fn height(&self) -> usize {
        (self.room_size - 1) * self.num_rows + 1
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self { room_size: 8, num_rows: 3, num_cols: 3 }
    }
}

/// One room and the state of its four walls.
#[derive(Clone, Debug)]
pub struct Room {
    /// Top-left wall cell.
    pub top:       Pos,
    /// Side length including both walls.
    pub size:      usize,
    /// Room `(i, j)` behind each wall, if any.
    pub neighbors: [Option<(usize, usize)>; 4],
    /// Where a door in each wall would go; shared with the neighbour.
    pub door_pos:  [Option<Pos>; 4],
    /// Door cells actually placed.
    pub doors:     [Option<Pos>; 4],
    pub locked:    bool,
    /// Cells of the objects added to this room.
    pub objs:      Vec<Pos>,
}

impl Room {
    /// Whether `pos` lies strictly inside the walls.
    pub fn contains(&self, (x, y): Pos) -> bool {
        x > self.top.0 && x < self.top.0 + self.size - 1 && y > self.top.1 && y < self.top.1 + self.size - 1
    }
}

/// Grid of rooms plus the agent and the generator that lays them out.
#[derive(Clone, Debug)]
pub struct RoomGrid {
    layout:    Layout,
    grid:      Grid,
    rooms:     Vec<Room>,
    agent_pos: Pos,
    agent_dir: Direction,
    rng:       SimRng,
}

impl RoomGrid {
    /// Walls for every room and one candidate door cell per shared wall.
    /// The agent starts in the centre of the middle room facing East.
    pub fn new(layout: Layout, mut rng: SimRng) -> LevelResult<Self> {
        if layout.room_size < 3 || layout.num_rows == 0 || layout.num_cols == 0 {
            return Err(LevelError::Config(format!(
                "need rooms of size >= 3 in a non-empty layout, got {layout:?}"
            )));
        }
        let Layout { room_size, num_rows, num_cols } = layout;
        let step = room_size - 1;
        let mut grid = Grid::new(layout.width(), layout.height());
        let mut rooms = Vec::with_capacity(num_rows * num_cols);

        for j in 0..num_rows {
            for i in 0..num_cols {
                let top = (i * step, j * step);
                grid.wall_rect(top.0, top.1, room_size, room_size);

                let mut room = Room {
                    top,
                    size: room_size,
                    neighbors: [None; 4],
                    door_pos: [None; 4],
                    doors: [None; 4],
                    locked: false,
                    objs: Vec::new(),
                };
                if i + 1 < num_cols {
                    room.neighbors[0] = Some((i + 1, j));
                    room.door_pos[0] = Some((top.0 + step, rng.gen_range(top.1 + 1..top.1 + step)));
                }
                if j + 1 < num_rows {
                    room.neighbors[1] = Some((i, j + 1));
                    room.door_pos[1] = Some((rng.gen_range(top.0 + 1..top.0 + step), top.1 + step));
                }
                if i > 0 {
                    room.neighbors[2] = Some((i - 1, j));
                }
                if j > 0 {
                    room.neighbors[3] = Some((i, j - 1));
                }
                rooms.push(room);
            }
        }
        // West and North slots mirror the neighbour's East and South slots.
        for idx in 0..rooms.len() {
            let (i, j) = (idx % num_cols, idx / num_cols);
            if i > 0 {
                rooms[idx].door_pos[2] = rooms[idx - 1].door_pos[0];
            }
            if j > 0 {
                rooms[idx].door_pos[3] = rooms[idx - num_cols].door_pos[1];
            }
        }

        let agent_pos = ((num_cols / 2) * step + room_size / 2, (num_rows / 2) * step + room_size / 2);
        Ok(Self { layout, grid, rooms, agent_pos, agent_dir: Direction::East, rng })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, i: usize, j: usize) -> Option<&Room> {
        (i < self.layout.num_cols && j < self.layout.num_rows)
            .then(|| &self.rooms[j * self.layout.num_cols + i])
    }

    pub fn agent_pos(&self) -> Pos {
        self.agent_pos
    }

    pub fn agent_dir(&self) -> Direction {
        self.agent_dir
    }

    pub fn front_pos(&self) -> Option<Pos> {
        front_of(self.agent_pos, self.agent_dir)
    }

    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Room `(i, j)` whose area contains `pos`.  Cells on a shared wall
    /// belong to the room to their East or South.
    pub fn room_from_pos(&self, (x, y): Pos) -> Option<(usize, usize)> {
        let step = self.layout.room_size - 1;
        let (i, j) = (x / step, y / step);
        (i < self.layout.num_cols && j < self.layout.num_rows).then_some((i, j))
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Put an object in room `(i, j)`, drawing any unspecified kind from
    /// [`ObjKind::PICKABLE`] and any unspecified colour uniformly.  The
    /// object never lands on or next to the agent.
    pub fn add_object(
        &mut self,
        i:     usize,
        j:     usize,
        kind:  Option<ObjKind>,
        color: Option<Color>,
    ) -> LevelResult<(WorldObj, Pos)> {
        let idx = self.room_index(i, j)?;
        let kind = match kind {
            Some(k) => k,
            None => self.rand_kind(),
        };
        let color = match color {
            Some(c) => c,
            None => self.rand_color(),
        };
        let obj = WorldObj::new(kind, color);
        let pos = self.place_in_room(idx, obj)?;
        self.rooms[idx].objs.push(pos);
        Ok((obj, pos))
    }

    /// Put a door in one wall of room `(i, j)`.  Without `door_idx` a random
    /// wall that has a neighbour and no door yet is chosen; colour and lock
    /// state are random when not given.  The room's `locked` flag follows the
    /// new door.
    pub fn add_door(
        &mut self,
        i:        usize,
        j:        usize,
        door_idx: Option<Direction>,
        color:    Option<Color>,
        locked:   Option<bool>,
    ) -> LevelResult<(WorldObj, Pos)> {
        let idx = self.room_index(i, j)?;
        let dir = match door_idx {
            Some(d) => d,
            None => self.free_wall(idx)?,
        };
        let color = match color {
            Some(c) => c,
            None => self.rand_color(),
        };
        let locked = match locked {
            Some(l) => l,
            None => self.rng.gen_bool(0.5),
        };

        let k = dir.index();
        let room = &self.rooms[idx];
        let (Some((ni, nj)), Some(pos)) = (room.neighbors[k], room.door_pos[k]) else {
            return Err(LevelError::Config(format!("room ({i}, {j}) has no neighbour to the {dir}")));
        };
        if room.doors[k].is_some() {
            return Err(LevelError::Reject(format!("room ({i}, {j}) already has a door to the {dir}")));
        }

        let state = if locked { DoorState::Locked } else { DoorState::Closed };
        let door = WorldObj::door(color, state);
        self.grid.set(pos, Some(door))?;
        self.rooms[idx].locked = locked;
        self.rooms[idx].doors[k] = Some(pos);
        let n = nj * self.layout.num_cols + ni;
        self.rooms[n].doors[dir.opposite().index()] = Some(pos);
        Ok((door, pos))
    }

    /// Add `num` random pickable objects, each in room `room` or a random
    /// room.  With `all_unique`, no two objects in the grid share both kind
    /// and colour.
    pub fn add_distractors(
        &mut self,
        room:       Option<(usize, usize)>,
        num:        usize,
        all_unique: bool,
    ) -> LevelResult<Vec<(WorldObj, Pos)>> {
        let mut seen: HashSet<(ObjKind, Color)> = self
            .rooms
            .iter()
            .flat_map(|r| r.objs.iter())
            .filter_map(|&p| self.grid.get(p))
            .map(|o| (o.kind, o.color))
            .collect();

        let mut dists = Vec::with_capacity(num);
        let mut draws = 0;
        while dists.len() < num {
            if draws >= MAX_PLACEMENT_ATTEMPTS {
                return Err(GridError::Placement { what: "distractor", attempts: draws }.into());
            }
            draws += 1;
            let color = self.rand_color();
            let kind = self.rand_kind();
            if all_unique && seen.contains(&(kind, color)) {
                continue;
            }
            let (i, j) = match room {
                Some(r) => r,
                None => self.rand_room(),
            };
            dists.push(self.add_object(i, j, Some(kind), Some(color))?);
            seen.insert((kind, color));
        }
        Ok(dists)
    }

    /// Recolour the object at `pos`.  Returns `false` for an empty cell.
    pub fn recolor(&mut self, pos: Pos, color: Color) -> bool {
        match self.grid.get_mut(pos) {
            Some(obj) => {
                obj.color = color;
                true
            }
            None => false,
        }
    }

    /// Move the agent to a free cell of room `room` (random room if `None`)
    /// from which it faces an empty cell or a wall.
    pub fn place_agent(&mut self, room: Option<(usize, usize)>, rand_dir: bool) -> LevelResult<Pos> {
        let (i, j) = match room {
            Some(r) => r,
            None => self.rand_room(),
        };
        let idx = self.room_index(i, j)?;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = self.rand_interior(idx);
            if !self.grid.is_empty(pos) {
                continue;
            }
            let dir = if rand_dir { Direction::from_index(self.rng.gen_range(0..4)) } else { self.agent_dir };
            let ahead = front_of(pos, dir).and_then(|p| self.grid.get(p));
            if ahead.is_none_or(|o| o.kind == ObjKind::Wall) {
                self.agent_pos = pos;
                self.agent_dir = dir;
                return Ok(pos);
            }
        }
        Err(GridError::Placement { what: "agent", attempts: MAX_PLACEMENT_ATTEMPTS }.into())
    }

    // ── Connectivity ──────────────────────────────────────────────────────

    /// Add unlocked doors until every room is reachable from the agent's
    /// room.  Locked rooms never receive extra doors.  Returns the new door
    /// cells.
    pub fn connect_all(&mut self, door_colors: &[Color]) -> LevelResult<Vec<Pos>> {
        if door_colors.is_empty() {
            return Err(LevelError::Config("connect_all needs at least one door colour".to_owned()));
        }
        let start = self.room_from_pos(self.agent_pos).ok_or_else(|| {
            LevelError::Config(format!("agent at {:?} is outside every room", self.agent_pos))
        })?;
        let total = self.rooms.len();
        let mut added = Vec::new();
        let mut rounds = 0;

        while self.reachable_rooms(start) < total {
            if rounds >= MAX_CONNECT_ITERATIONS {
                return Err(GridError::Placement { what: "connecting door", attempts: rounds }.into());
            }
            rounds += 1;

            let (i, j) = self.rand_room();
            let k = self.rng.gen_range(0..4);
            let room = &self.rooms[j * self.layout.num_cols + i];
            let Some((ni, nj)) = room.neighbors[k] else {
                continue;
            };
            if room.doors[k].is_some() || room.locked || self.rooms[nj * self.layout.num_cols + ni].locked {
                continue;
            }
            let color = door_colors[self.rng.gen_range(0..door_colors.len())];
            let (_, pos) = self.add_door(i, j, Some(Direction::from_index(k)), Some(color), Some(false))?;
            added.push(pos);
        }
        debug!("connected {total} rooms with {} new doors in {rounds} rounds", added.len());
        Ok(added)
    }

    /// Fail with [`LevelError::Reject`] if some non-wall object cannot be
    /// reached from the agent.  Doors count as passable whatever their state.
    pub fn check_objs_reachable(&self) -> LevelResult<()> {
        let (w, h) = (self.grid.width(), self.grid.height());
        let mut reachable = vec![false; w * h];
        let mut stack = vec![self.agent_pos];
        while let Some(p) = stack.pop() {
            if !self.grid.in_bounds(p) || reachable[p.1 * w + p.0] {
                continue;
            }
            reachable[p.1 * w + p.0] = true;
            if self.grid.get(p).is_some_and(|o| o.kind != ObjKind::Door) {
                continue;
            }
            stack.extend(Direction::ALL.iter().filter_map(|&d| front_of(p, d)));
        }

        match self
            .grid
            .objects()
            .find(|&(p, o)| o.kind != ObjKind::Wall && !reachable[p.1 * w + p.0])
        {
            Some((p, o)) => Err(LevelError::Reject(format!("unreachable {o} at {p:?}"))),
            None => Ok(()),
        }
    }

    pub fn open_all_doors(&mut self) {
        let cells: Vec<Pos> = self.rooms.iter().flat_map(|r| r.doors.iter().flatten().copied()).collect();
        for p in cells {
            if let Some(door) = self.grid.get_mut(p) {
                door.door = Some(DoorState::Open);
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn room_index(&self, i: usize, j: usize) -> LevelResult<usize> {
        if i >= self.layout.num_cols || j >= self.layout.num_rows {
            return Err(LevelError::Config(format!(
                "room ({i}, {j}) outside the {}x{} layout",
                self.layout.num_cols, self.layout.num_rows
            )));
        }
        Ok(j * self.layout.num_cols + i)
    }

    fn rand_room(&mut self) -> (usize, usize) {
        (self.rng.gen_range(0..self.layout.num_cols), self.rng.gen_range(0..self.layout.num_rows))
    }

    fn rand_color(&mut self) -> Color {
        Color::ALL[self.rng.gen_range(0..Color::ALL.len())]
    }

    fn rand_kind(&mut self) -> ObjKind {
        ObjKind::PICKABLE[self.rng.gen_range(0..ObjKind::PICKABLE.len())]
    }

    fn rand_interior(&mut self, idx: usize) -> Pos {
        let (top, size) = (self.rooms[idx].top, self.rooms[idx].size);
        (
            self.rng.gen_range(top.0 + 1..top.0 + size - 1),
            self.rng.gen_range(top.1 + 1..top.1 + size - 1),
        )
    }

    /// Random wall of room `idx` that has a neighbour and no door.
    fn free_wall(&mut self, idx: usize) -> LevelResult<Direction> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let d = Direction::from_index(self.rng.gen_range(0..4));
            let room = &self.rooms[idx];
            if room.neighbors[d.index()].is_some() && room.doors[d.index()].is_none() {
                return Ok(d);
            }
        }
        Err(GridError::Placement { what: "door", attempts: MAX_PLACEMENT_ATTEMPTS }.into())
    }

    /// Free cell of room `idx` not on or beside the agent.
    fn place_in_room(&mut self, idx: usize, obj: WorldObj) -> LevelResult<Pos> {
        let (ax, ay) = self.agent_pos;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = self.rand_interior(idx);
            if !self.grid.is_empty(pos) || pos.0.abs_diff(ax) + pos.1.abs_diff(ay) < 2 {
                continue;
            }
            self.grid.set(pos, Some(obj))?;
            return Ok(pos);
        }
        Err(GridError::Placement { what: "object", attempts: MAX_PLACEMENT_ATTEMPTS }.into())
    }

    /// Number of rooms reachable from `start` through placed doors.
    fn reachable_rooms(&self, start: (usize, usize)) -> usize {
        let cols = self.layout.num_cols;
        let mut seen = vec![false; self.rooms.len()];
        let mut stack = vec![start.1 * cols + start.0];
        let mut count = 0;
        while let Some(idx) = stack.pop() {
            if seen[idx] {
                continue;
            }
            seen[idx] = true;
            count += 1;
            let room = &self.rooms[idx];
            for k in 0..4 {
                if let (Some(_), Some((ni, nj))) = (room.doors[k], room.neighbors[k]) {
                    stack.push(nj * cols + ni);
                }
            }
        }
        count
    }
}
