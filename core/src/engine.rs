use alloc::vec;
use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Shell game state for one table, reused across rounds.
#[derive(Clone, Debug)]
pub struct ShellGame {
    config: GameConfig,
    rng: SmallRng,
    history: Vec<Layout>,
    move_limit: MoveLimit,
    locked_move_limit: MoveLimit,
    choice: Option<ShellIndex>,
    phase: Phase,
    epoch: Epoch,
}

impl ShellGame {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let move_limit = MoveLimit::default();
        Ok(Self {
            history: vec![config.preset_layout()],
            config,
            rng: SmallRng::seed_from_u64(seed),
            move_limit,
            locked_move_limit: move_limit,
            choice: None,
            phase: Default::default(),
            epoch: Default::default(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn history(&self) -> &[Layout] {
        &self.history
    }

    pub fn initial_layout(&self) -> &Layout {
        &self.history[0]
    }

    pub fn current_layout(&self) -> &Layout {
        &self.history[self.history.len() - 1]
    }

    /// Setting used by the next round.
    pub fn move_limit(&self) -> MoveLimit {
        self.move_limit
    }

    /// Setting the current round plays with.
    pub fn locked_move_limit(&self) -> MoveLimit {
        self.locked_move_limit
    }

    pub fn moves_done(&self) -> usize {
        self.history.len() - 1
    }

    pub fn choice(&self) -> Option<ShellIndex> {
        self.choice
    }

    pub fn choice_outcome(&self) -> Option<ChoiceOutcome> {
        self.choice.map(|shell| ChoiceOutcome {
            shell,
            is_win: self.current_layout()[shell].has_ball,
        })
    }

    pub fn phase_flags(&self) -> PhaseFlags {
        derive_phase(&self.history, self.locked_move_limit)
    }

    /// Takes effect when the next round starts.
    pub fn set_move_limit(&mut self, moves: u8) -> Result<MoveLimit> {
        let move_limit = MoveLimit::new(moves)?;
        if self.phase.is_active() {
            log::debug!("move limit {} queued for the next round", moves);
        }
        self.move_limit = move_limit;
        Ok(move_limit)
    }

    pub fn start_round(&mut self) -> &Layout {
        let ball = self.rng.random_range(0..self.config.shell_count);
        self.epoch = self.epoch.next();
        self.locked_move_limit = self.move_limit;
        self.choice = None;
        self.history.clear();
        self.history.push(self.config.preset_layout().with_ball_at(ball));
        self.phase = Phase::Revealing;

        log::debug!(
            "round {} started, {} moves",
            self.epoch.get(),
            self.locked_move_limit.get()
        );
        &self.history[0]
    }

    pub fn advance_shuffle(&mut self) -> Result<StepOutcome> {
        use Phase::*;

        match self.phase {
            Idle => return Err(GameError::NotStarted),
            AwaitingGuess | Resolved => return Ok(StepOutcome::NoChange),
            Revealing | Shuffling => {}
        }

        let limit = self.locked_move_limit.as_usize();
        let is_final = self.moves_done() + 1 == limit;
        let next = if is_final {
            settle_layout(&mut self.rng, &self.history[0])
        } else {
            let previous = &self.history[self.history.len() - 1];
            scatter_layout(&mut self.rng, &self.config, previous)?
        };
        self.history.push(next);

        log::debug!("round {} move {}/{}", self.epoch.get(), self.moves_done(), limit);

        Ok(if is_final {
            self.phase = AwaitingGuess;
            StepOutcome::Settled
        } else {
            self.phase = Shuffling;
            StepOutcome::Shuffled
        })
    }

    /// Step only if `epoch` is still the running round, triggers left over from an earlier round are dropped.
    pub fn advance_shuffle_for(&mut self, epoch: Epoch) -> Result<Option<StepOutcome>> {
        if epoch != self.epoch {
            log::warn!(
                "dropped step for round {}, round {} is running",
                epoch.get(),
                self.epoch.get()
            );
            return Ok(None);
        }
        self.advance_shuffle().map(Some)
    }

    pub fn choose(&mut self, shell: ShellIndex) -> Result<ChoiceOutcome> {
        if shell >= self.config.shell_count {
            return Err(GameError::InvalidShell);
        }
        if !self.phase.accepts_guess() {
            return Err(GameError::GuessNotAllowed);
        }

        let is_win = self.current_layout()[shell].has_ball;
        self.choice = Some(shell);
        self.phase = Phase::Resolved;

        log::debug!("round {} guessed shell {}, win: {}", self.epoch.get(), shell, is_win);
        Ok(ChoiceOutcome { shell, is_win })
    }
}
