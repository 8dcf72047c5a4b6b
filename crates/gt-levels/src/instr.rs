//! Object descriptions and the go-to instruction.

use std::fmt;

use gt_core::Direction;
use gt_grid::{Color, Grid, ObjKind, Pos, WorldObj, front_of};

/// Kind and colour an instruction refers to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjDesc {
    pub kind:  ObjKind,
    pub color: Color,
}

impl ObjDesc {
    pub fn new(kind: ObjKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn of(obj: &WorldObj) -> Self {
        Self { kind: obj.kind, color: obj.color }
    }

    pub fn matches(&self, obj: &WorldObj) -> bool {
        obj.kind == self.kind && obj.color == self.color
    }

    /// Positions of every object in `grid` fitting this description.
    pub fn find_matching(&self, grid: &Grid) -> Vec<Pos> {
        grid.objects().filter(|(_, o)| self.matches(o)).map(|(p, _)| p).collect()
    }

    /// "the red ball"
    pub fn surface(&self) -> String {
        format!("the {} {}", self.color, self.kind)
    }
}

impl fmt::Display for ObjDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.surface())
    }
}

/// "go to the <colour> <kind>": satisfied once the agent faces a matching
/// object from the adjacent cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GoToInstr {
    pub desc: ObjDesc,
}

impl GoToInstr {
    pub fn new(desc: ObjDesc) -> Self {
        Self { desc }
    }

    pub fn surface(&self) -> String {
        format!("go to {}", self.desc.surface())
    }

    pub fn is_satisfied(&self, grid: &Grid, agent_pos: Pos, agent_dir: Direction) -> bool {
        front_of(agent_pos, agent_dir)
            .and_then(|p| grid.get(p))
            .is_some_and(|o| self.desc.matches(o))
    }
}
