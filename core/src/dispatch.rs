use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything that can happen to a table, as sent by the UI or by timers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SetMoveLimit(u8),
    Start,
    /// Shuffle step tagged with the round it was scheduled for.
    Step(Epoch),
    Choose(ShellIndex),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    MoveLimitSet(MoveLimit),
    RoundStarted { epoch: Epoch, layout: Layout },
    Moved { epoch: Epoch, outcome: StepOutcome },
    StaleStep(Epoch),
    Guessed(ChoiceOutcome),
}

impl Event {
    /// Follow-up step the driver has to schedule, with the delay in ms to wait before sending it.
    pub fn next_step(&self, timing: &Timing) -> Option<(Command, u32)> {
        match *self {
            Self::RoundStarted { epoch, .. } => Some((Command::Step(epoch), timing.reveal_delay_ms)),
            Self::Moved {
                epoch,
                outcome: StepOutcome::Shuffled,
            } => Some((Command::Step(epoch), timing.step_interval_ms)),
            _ => None,
        }
    }

    pub const fn has_update(&self) -> bool {
        match self {
            Self::Moved { outcome, .. } => outcome.has_update(),
            Self::StaleStep(_) => false,
            _ => true,
        }
    }
}

impl ShellGame {
    pub fn apply(&mut self, command: Command) -> Result<Event> {
        use Command::*;

        Ok(match command {
            SetMoveLimit(moves) => Event::MoveLimitSet(self.set_move_limit(moves)?),
            Start => {
                let layout = self.start_round().clone();
                Event::RoundStarted {
                    epoch: self.epoch(),
                    layout,
                }
            }
            Step(epoch) => match self.advance_shuffle_for(epoch)? {
                Some(outcome) => Event::Moved { epoch, outcome },
                None => Event::StaleStep(epoch),
            },
            Choose(shell) => Event::Guessed(self.choose(shell)?),
        })
    }
}

/// Commands waiting to be applied, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies every queued command in order. A failed command is reported in place and the rest still run.
    pub fn drain_into(&mut self, game: &mut ShellGame) -> Vec<Result<Event>> {
        self.pending
            .drain(..)
            .map(|command| {
                let result = game.apply(command);
                if let Err(err) = &result {
                    log::warn!("command {:?} rejected: {}", command, err);
                }
                result
            })
            .collect()
    }
}
