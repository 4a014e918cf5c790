use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No round played yet.
    Idle,
    /// Round started, the ball is shown before anything moves.
    Revealing,
    Shuffling,
    AwaitingGuess,
    /// A shell was picked; picking again only replaces the choice.
    Resolved,
}

impl Phase {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Round in progress, settings and the start button stay locked.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Revealing | Self::Shuffling)
    }

    pub const fn accepts_guess(self) -> bool {
        matches!(self, Self::AwaitingGuess | Self::Resolved)
    }

    /// Phase implied by a round history, used to cross-check the tracked one.
    pub fn derive(history: &[Layout], move_limit: MoveLimit, choice: Option<ShellIndex>) -> Self {
        let flags = derive_phase(history, move_limit);
        if !flags.is_started {
            Self::Idle
        } else if flags.is_ball_visible {
            Self::Revealing
        } else if flags.is_shuffling {
            Self::Shuffling
        } else if choice.is_some() {
            Self::Resolved
        } else {
            Self::AwaitingGuess
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseFlags {
    pub is_started: bool,
    pub is_ball_visible: bool,
    pub moves_done: usize,
    pub is_finished: bool,
    pub is_shuffling: bool,
}

/// Round flags computed purely from what has been played so far.
pub fn derive_phase(history: &[Layout], move_limit: MoveLimit) -> PhaseFlags {
    let limit = move_limit.as_usize();
    let is_started = history.first().is_some_and(Layout::has_ball);
    let moves_done = history.len().saturating_sub(1);

    PhaseFlags {
        is_started,
        is_ball_visible: is_started && history.len() == 1,
        moves_done,
        is_finished: moves_done == limit,
        is_shuffling: moves_done > 0 && moves_done < limit,
    }
}
