//! Level strategy trait and the rejection-sampling generator.

use log::{debug, info, warn};

use gt_core::SimRng;

use crate::{GoToInstr, Layout, LevelError, LevelResult, RoomGrid};

/// Layouts tried before [`generate`] gives up.
pub const MAX_GENERATION_ATTEMPTS: u32 = 1_000;

/// A level populates a fresh [`RoomGrid`] and states the instruction.
///
/// Returning [`LevelError::Reject`] (or a placement failure) discards the
/// layout and [`generate`] tries again with a new one.
pub trait Level {
    fn layout(&self) -> Layout {
        Layout::default()
    }

    fn gen_mission(&self, rooms: &mut RoomGrid) -> LevelResult<GoToInstr>;
}

/// A generated level: the populated rooms and the instruction to follow.
#[derive(Clone, Debug)]
pub struct Mission {
    pub rooms:    RoomGrid,
    pub instr:    GoToInstr,
    /// Layouts drawn, including the accepted one.
    pub attempts: u32,
}

impl Mission {
    pub fn surface(&self) -> String {
        self.instr.surface()
    }

    /// Whether the agent, where it stands now, completes the instruction.
    pub fn is_satisfied(&self) -> bool {
        self.instr.is_satisfied(self.rooms.grid(), self.rooms.agent_pos(), self.rooms.agent_dir())
    }
}

/// Draw layouts from `seed` until `level` accepts one whose instruction
/// names an object actually present.
pub fn generate<L: Level + ?Sized>(level: &L, seed: u64) -> LevelResult<Mission> {
    let layout = level.layout();
    let mut rng = SimRng::new(seed);

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let mut rooms = RoomGrid::new(layout, rng.child(u64::from(attempt)))?;
        let outcome = level.gen_mission(&mut rooms).and_then(|instr| {
            if instr.desc.find_matching(rooms.grid()).is_empty() {
                Err(LevelError::Reject(format!("no object matches \"{}\"", instr.surface())))
            } else {
                Ok(instr)
            }
        });
        match outcome {
            Ok(instr) => {
                info!("level generated after {attempt} attempt(s): \"{}\"", instr.surface());
                return Ok(Mission { rooms, instr, attempts: attempt });
            }
            Err(e) if e.is_retryable() => debug!("attempt {attempt} discarded: {e}"),
            Err(e) => return Err(e),
        }
    }
    warn!("level generation gave up after {MAX_GENERATION_ATTEMPTS} attempts (seed {seed})");
    Err(LevelError::AttemptsExhausted { attempts: MAX_GENERATION_ATTEMPTS })
}
