#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use dispatch::*;
pub use engine::*;
pub use error::*;
pub use phase::*;
pub use placement::*;
pub use types::*;

mod dispatch;
mod engine;
mod error;
mod phase;
mod placement;
mod types;

/// Table extent and the square footprint of a single shell, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub shell_size: Coord,
}

impl BoardConfig {
    pub const fn new(width: Coord, height: Coord, shell_size: Coord) -> Self {
        Self {
            width,
            height,
            shell_size,
        }
    }

    /// Largest x (exclusive) a sampled shell may start at.
    pub const fn x_span(&self) -> Coord {
        self.width.saturating_sub(self.shell_size)
    }

    /// Largest y (exclusive) a sampled shell may start at.
    pub const fn y_span(&self) -> Coord {
        self.height.saturating_sub(self.shell_size)
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.x <= self.x_span() && pos.y <= self.y_span()
    }

    /// Starting row: shells spread evenly over the width, one shell size from the top.
    pub fn preset_layout(&self, shell_count: usize) -> Layout {
        let width = u32::from(self.width);
        let slots = shell_count as u32 + 1;
        let half = u32::from(self.shell_size / 2);
        (0..shell_count)
            .map(|i| {
                let center = width * (i as u32 + 1) / slots;
                let x = center.saturating_sub(half) as Coord;
                Shell::new(x, self.shell_size, false)
            })
            .collect()
    }

    fn validate(&self, shell_count: usize) -> Result<()> {
        if self.shell_size == 0 || self.width <= self.shell_size {
            return Err(GameError::BoardTooSmall);
        }
        if u32::from(self.height) < 2 * u32::from(self.shell_size) {
            return Err(GameError::BoardTooSmall);
        }
        let spacing = u32::from(self.width) / (shell_count as u32 + 1);
        if spacing <= u32::from(self.shell_size) {
            return Err(GameError::BoardTooSmall);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(800, 600, 100)
    }
}

/// Pacing hints for whoever drives the shuffle steps; the engine itself never waits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub reveal_delay_ms: u32,
    pub step_interval_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 1500,
            step_interval_ms: 700,
        }
    }
}

/// Table setup for a [`ShellGame`]. Deserializing runs the same checks as [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameConfigFields")]
pub struct GameConfig {
    pub board: BoardConfig,
    pub shell_count: usize,
    pub overlap: OverlapPolicy,
    pub timing: Timing,
}

impl GameConfig {
    pub const DEFAULT_SHELL_COUNT: usize = 3;

    pub const fn new_unchecked(
        board: BoardConfig,
        shell_count: usize,
        overlap: OverlapPolicy,
        timing: Timing,
    ) -> Self {
        Self {
            board,
            shell_count,
            overlap,
            timing,
        }
    }

    pub fn new(
        board: BoardConfig,
        shell_count: usize,
        overlap: OverlapPolicy,
        timing: Timing,
    ) -> Result<Self> {
        let config = Self::new_unchecked(board, shell_count, overlap, timing);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.shell_count < 2 {
            return Err(GameError::InvalidShellCount);
        }
        self.board.validate(self.shell_count)
    }

    pub fn preset_layout(&self) -> Layout {
        self.board.preset_layout(self.shell_count)
    }
}

#[derive(Deserialize)]
struct GameConfigFields {
    board: BoardConfig,
    shell_count: usize,
    overlap: OverlapPolicy,
    timing: Timing,
}

impl TryFrom<GameConfigFields> for GameConfig {
    type Error = GameError;

    fn try_from(fields: GameConfigFields) -> Result<Self> {
        Self::new(fields.board, fields.shell_count, fields.overlap, fields.timing)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            shell_count: Self::DEFAULT_SHELL_COUNT,
            overlap: OverlapPolicy::default(),
            timing: Timing::default(),
        }
    }
}

/// Number of shuffle steps played before the player may guess.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoveLimit(u8);

impl MoveLimit {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 50;

    pub const fn new(moves: u8) -> Result<Self> {
        if moves < Self::MIN || moves > Self::MAX {
            Err(GameError::InvalidMoveLimit)
        } else {
            Ok(Self(moves))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for MoveLimit {
    fn default() -> Self {
        Difficulty::default().move_limit()
    }
}

impl TryFrom<u8> for MoveLimit {
    type Error = GameError;

    fn try_from(moves: u8) -> Result<Self> {
        Self::new(moves)
    }
}

impl From<MoveLimit> for u8 {
    fn from(limit: MoveLimit) -> Self {
        limit.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "Beginner",
            Intermediate => "Intermediate",
            Expert => "Expert",
        }
    }

    pub const fn move_limit(self) -> MoveLimit {
        use Difficulty::*;
        MoveLimit(match self {
            Beginner => 3,
            Intermediate => 5,
            Expert => 10,
        })
    }

    pub fn from_move_limit(limit: MoveLimit) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.move_limit() == limit)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    NoChange,
    Shuffled,
    Settled,
}

impl StepOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Shuffled => true,
            Self::Settled => true,
        }
    }

    /// Whether this step ended the shuffling and opened the guess.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Settled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub shell: ShellIndex,
    pub is_win: bool,
}
