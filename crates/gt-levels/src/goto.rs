//! The go-to family of levels.
//!
//! | Level                | Layout          | Target                                   |
//! |----------------------|-----------------|------------------------------------------|
//! | `GoToRedBallGrey`    | 1 room          | red ball among grey distractors          |
//! | `GoToRedBall`        | 1 room          | red ball among distractors               |
//! | `GoToRedBallNoDists` | 1 room          | red ball alone                           |
//! | `GoToObj`            | 1 room          | the only object                          |
//! | `GoToLocal`          | 1 room          | one of 8 distractors                     |
//! | `GoTo`               | 3×3 rooms       | any of 18 distractors, rooms connected   |
//! | `GoToImpUnlock`      | 3×3 rooms       | object behind a locked door              |
//! | `GoToRedBlueBall`    | 1 room          | the single red or blue ball              |
//! | `GoToDoor`           | 3×3 rooms of 7  | one of four doors of the centre room     |
//! | `GoToObjDoor`        | 3×3 rooms       | object or door in the centre room        |

use gt_grid::{Color, GridError, MAX_PLACEMENT_ATTEMPTS, ObjKind, Pos, WorldObj};

use crate::{GoToInstr, Layout, Level, LevelError, LevelResult, ObjDesc, RoomGrid};

/// Every registered level name, in table order.
pub const LEVEL_NAMES: [&str; 10] = [
    "GoToRedBallGrey",
    "GoToRedBall",
    "GoToRedBallNoDists",
    "GoToObj",
    "GoToLocal",
    "GoTo",
    "GoToImpUnlock",
    "GoToRedBlueBall",
    "GoToDoor",
    "GoToObjDoor",
];

/// Look a level up by name, with or without the `BabyAI-…-v0` wrapping.
pub fn level_by_name(name: &str) -> Option<Box<dyn Level>> {
    let name = name.strip_prefix("BabyAI-").unwrap_or(name);
    let name = name.strip_suffix("-v0").unwrap_or(name);
    let level: Box<dyn Level> = match name {
        "GoToRedBallGrey"    => Box::new(GoToRedBallGrey::default()),
        "GoToRedBall"        => Box::new(GoToRedBall::default()),
        "GoToRedBallNoDists" => Box::new(GoToRedBallNoDists),
        "GoToObj"            => Box::new(GoToObj::default()),
        "GoToLocal"          => Box::new(GoToLocal::default()),
        "GoTo"               => Box::new(GoTo::default()),
        "GoToImpUnlock"      => Box::new(GoToImpUnlock),
        "GoToRedBlueBall"    => Box::new(GoToRedBlueBall::default()),
        "GoToDoor"           => Box::new(GoToDoor),
        "GoToObjDoor"        => Box::new(GoToObjDoor),
        _ => return None,
    };
    Some(level)
}

fn pick(rooms: &mut RoomGrid, objs: &[(WorldObj, Pos)]) -> LevelResult<WorldObj> {
    rooms
        .rng()
        .choose(objs)
        .map(|&(obj, _)| obj)
        .ok_or_else(|| LevelError::Reject("no candidate objects".to_owned()))
}

fn go_to(obj: &WorldObj) -> GoToInstr {
    GoToInstr::new(ObjDesc::of(obj))
}

// ── Single room ───────────────────────────────────────────────────────────────

/// Red ball in one room; distractors are all recoloured grey.
#[derive(Copy, Clone, Debug)]
pub struct GoToRedBallGrey {
    pub room_size: usize,
    pub num_dists: usize,
}

impl Default for GoToRedBallGrey {
    fn default() -> Self {
        Self { room_size: 8, num_dists: 7 }
    }
}

impl Level for GoToRedBallGrey {
    fn layout(&self) -> Layout {
        Layout::single(self.room_size)
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        let (obj, _) = rooms.add_object(0, 0, Some(ObjKind::Ball), Some(Color::Red))?;
        for (_, pos) in rooms.add_distractors(None, self.num_dists, false)? {
            rooms.recolor(pos, Color::Grey);
        }
        rooms.check_objs_reachable()?;
        Ok(go_to(&obj))
    }
}

/// Red ball in one room with coloured distractors.
#[derive(Copy, Clone, Debug)]
pub struct GoToRedBall {
    pub room_size: usize,
    pub num_dists: usize,
}

impl Default for GoToRedBall {
    fn default() -> Self {
        Self { room_size: 8, num_dists: 7 }
    }
}

impl Level for GoToRedBall {
    fn layout(&self) -> Layout {
        Layout::single(self.room_size)
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        let (obj, _) = rooms.add_object(0, 0, Some(ObjKind::Ball), Some(Color::Red))?;
        rooms.add_distractors(None, self.num_dists, false)?;
        rooms.check_objs_reachable()?;
        Ok(go_to(&obj))
    }
}

/// [`GoToRedBall`] with no distractors.
#[derive(Copy, Clone, Debug, Default)]
pub struct GoToRedBallNoDists;

impl GoToRedBallNoDists {
    const INNER: GoToRedBall = GoToRedBall { room_size: 8, num_dists: 0 };
}

impl Level for GoToRedBallNoDists {
    fn layout(&self) -> Layout {
        Self::INNER.layout()
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        Self::INNER.gen_mission(rooms)
    }
}

/// A single random object.
#[derive(Copy, Clone, Debug)]
pub struct GoToObj {
    pub room_size: usize,
}

impl Default for GoToObj {
    fn default() -> Self {
        Self { room_size: 8 }
    }
}

impl Level for GoToObj {
    fn layout(&self) -> Layout {
        Layout::single(self.room_size)
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        let objs = rooms.add_distractors(None, 1, true)?;
        let obj = pick(rooms, &objs)?;
        Ok(go_to(&obj))
    }
}

/// One of several objects in a single room.
#[derive(Copy, Clone, Debug)]
pub struct GoToLocal {
    pub room_size: usize,
    pub num_dists: usize,
}

impl Default for GoToLocal {
    fn default() -> Self {
        Self { room_size: 8, num_dists: 8 }
    }
}

impl Level for GoToLocal {
    fn layout(&self) -> Layout {
        Layout::single(self.room_size)
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        let objs = rooms.add_distractors(None, self.num_dists, false)?;
        rooms.check_objs_reachable()?;
        let obj = pick(rooms, &objs)?;
        Ok(go_to(&obj))
    }
}

/// The single red or blue ball; distractors never include one.
#[derive(Copy, Clone, Debug)]
pub struct GoToRedBlueBall {
    pub room_size: usize,
    pub num_dists: usize,
}

impl Default for GoToRedBlueBall {
    fn default() -> Self {
        Self { room_size: 8, num_dists: 7 }
    }
}

impl Level for GoToRedBlueBall {
    fn layout(&self) -> Layout {
        Layout::single(self.room_size)
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        let dists = rooms.add_distractors(None, self.num_dists, false)?;
        let clash = dists
            .iter()
            .any(|(o, _)| o.kind == ObjKind::Ball && matches!(o.color, Color::Red | Color::Blue));
        if clash {
            return Err(LevelError::Reject("a distractor is a red or blue ball".to_owned()));
        }
        let color = if rooms.rng().gen_bool(0.5) { Color::Red } else { Color::Blue };
        let (obj, _) = rooms.add_object(0, 0, Some(ObjKind::Ball), Some(color))?;
        rooms.check_objs_reachable()?;
        Ok(go_to(&obj))
    }
}

// ── Multi-room ────────────────────────────────────────────────────────────────

/// Any object in a connected maze of rooms.
#[derive(Copy, Clone, Debug)]
pub struct GoTo {
    pub room_size:  usize,
    pub num_rows:   usize,
    pub num_cols:   usize,
    pub num_dists:  usize,
    pub doors_open: bool,
}

impl Default for GoTo {
    fn default() -> Self {
        Self { room_size: 8, num_rows: 3, num_cols: 3, num_dists: 18, doors_open: false }
    }
}

impl Level for GoTo {
    fn layout(&self) -> Layout {
        Layout { room_size: self.room_size, num_rows: self.num_rows, num_cols: self.num_cols }
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(None, true)?;
        rooms.connect_all(&Color::ALL)?;
        let objs = rooms.add_distractors(None, self.num_dists, false)?;
        rooms.check_objs_reachable()?;
        let obj = pick(rooms, &objs)?;
        if self.doors_open {
            rooms.open_all_doors();
        }
        Ok(go_to(&obj))
    }
}

/// An object inside a locked room whose key lies in another room.
#[derive(Copy, Clone, Debug, Default)]
pub struct GoToImpUnlock;

impl Level for GoToImpUnlock {
    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        let Layout { num_rows, num_cols, .. } = rooms.layout();
        let locked = (rooms.rng().gen_range(0..num_cols), rooms.rng().gen_range(0..num_rows));
        let (door, _) = rooms.add_door(locked.0, locked.1, None, None, Some(true))?;

        let key_room = (0..MAX_PLACEMENT_ATTEMPTS)
            .map(|_| (rooms.rng().gen_range(0..num_cols), rooms.rng().gen_range(0..num_rows)))
            .find(|&r| r != locked)
            .ok_or(GridError::Placement { what: "key room", attempts: MAX_PLACEMENT_ATTEMPTS })?;
        rooms.add_object(key_room.0, key_room.1, Some(ObjKind::Key), Some(door.color))?;

        rooms.connect_all(&Color::ALL)?;

        // Keep the locked room empty until the agent is placed.
        for j in 0..num_rows {
            for i in 0..num_cols {
                if (i, j) != locked {
                    rooms.add_distractors(Some((i, j)), 2, false)?;
                }
            }
        }

        let mut placed = false;
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let pos = rooms.place_agent(None, true)?;
            if rooms.room_from_pos(pos) != Some(locked) {
                placed = true;
                break;
            }
        }
        if !placed {
            return Err(GridError::Placement { what: "agent outside locked room", attempts: MAX_PLACEMENT_ATTEMPTS }.into());
        }
        rooms.check_objs_reachable()?;

        let target = rooms.add_distractors(Some(locked), 1, false)?;
        let obj = pick(rooms, &target)?;
        Ok(go_to(&obj))
    }
}

/// One of four doors around the centre room.
#[derive(Copy, Clone, Debug, Default)]
pub struct GoToDoor;

impl Level for GoToDoor {
    fn layout(&self) -> Layout {
        Layout { room_size: 7, ..Layout::default() }
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        let mut doors = Vec::with_capacity(4);
        for _ in 0..4 {
            doors.push(rooms.add_door(1, 1, None, None, None)?);
        }
        rooms.place_agent(Some((1, 1)), true)?;
        let door = pick(rooms, &doors)?;
        Ok(GoToInstr::new(ObjDesc::new(ObjKind::Door, door.color)))
    }
}

/// An object or one of four doors in the centre room.
#[derive(Copy, Clone, Debug, Default)]
pub struct GoToObjDoor;

impl Level for GoToObjDoor {
    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr> {
        rooms.place_agent(Some((1, 1)), true)?;
        let mut objs = rooms.add_distractors(Some((1, 1)), 8, false)?;
        for _ in 0..4 {
            objs.push(rooms.add_door(1, 1, None, None, None)?);
        }
        rooms.check_objs_reachable()?;
        let obj = pick(rooms, &objs)?;
        Ok(go_to(&obj))
    }
}
