//! Objects that can occupy a grid cell.

use std::fmt;

/// What kind of thing sits in a cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjKind {
    Wall,
    Door,
    Key,
    Ball,
    Box,
    Goal,
    Lava,
}

impl ObjKind {
    /// Kinds an agent can carry; distractors are drawn from these.
    pub const PICKABLE: [ObjKind; 3] = [ObjKind::Key, ObjKind::Ball, ObjKind::Box];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjKind::Wall => "wall",
            ObjKind::Door => "door",
            ObjKind::Key  => "key",
            ObjKind::Ball => "ball",
            ObjKind::Box  => "box",
            ObjKind::Goal => "goal",
            ObjKind::Lava => "lava",
        }
    }
}

impl fmt::Display for ObjKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six object colours.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
    Yellow,
    Grey,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::Yellow,
        Color::Grey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red    => "red",
            Color::Green  => "green",
            Color::Blue   => "blue",
            Color::Purple => "purple",
            Color::Yellow => "yellow",
            Color::Grey   => "grey",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorState {
    Open,
    Closed,
    Locked,
}

/// A cell occupant.  `door` is `Some` exactly when `kind` is
/// [`ObjKind::Door`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldObj {
    pub kind:  ObjKind,
    pub color: Color,
    pub door:  Option<DoorState>,
}

impl WorldObj {
    /// A non-door object.  Use [`door`](Self::door) for doors.
    pub fn new(kind: ObjKind, color: Color) -> Self {
        let door = (kind == ObjKind::Door).then_some(DoorState::Closed);
        Self { kind, color, door }
    }

    pub fn wall() -> Self {
        Self::new(ObjKind::Wall, Color::Grey)
    }

    pub fn goal() -> Self {
        Self::new(ObjKind::Goal, Color::Green)
    }

    pub fn lava() -> Self {
        Self::new(ObjKind::Lava, Color::Red)
    }

    pub fn door(color: Color, state: DoorState) -> Self {
        Self { kind: ObjKind::Door, color, door: Some(state) }
    }

    /// `true` for open doors and for kinds an agent may step onto.
    pub fn can_overlap(&self) -> bool {
        match self.kind {
            ObjKind::Door => self.door == Some(DoorState::Open),
            ObjKind::Goal | ObjKind::Lava => true,
            _ => false,
        }
    }
}

impl fmt::Display for WorldObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
