use crate::settings::{self, DifficultyPicker};
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use shellgame_core as game;
use game::{Command, Event, Phase};
use yew::prelude::*;

const TITLE: &str = "Street game";

fn result_text(outcome: Option<game::ChoiceOutcome>) -> &'static str {
    match outcome {
        Some(game::ChoiceOutcome { is_win: true, .. }) => "YOU WIN!",
        Some(game::ChoiceOutcome { is_win: false, .. }) => "YOU LOSE",
        None => "\u{a0}",
    }
}

/// Start stays disabled while shells move, unless the round got stuck on a failed step.
fn is_start_locked(phase: Phase, error: Option<game::GameError>) -> bool {
    phase.is_active() && error.is_none()
}

/// The ball shows while it is being revealed, and again once the player guessed.
fn is_ball_visible(phase: Phase, shell: &game::Shell) -> bool {
    shell.has_ball && matches!(phase, Phase::Revealing | Phase::Resolved)
}

fn shell_style(shell: &game::Shell, size: game::Coord) -> String {
    format!(
        "transform: translate({}px, {}px); width: {size}px; height: {size}px;",
        shell.x, shell.y
    )
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Dispatch(Command),
    SetDifficulty(game::Difficulty),
}

#[derive(Properties, PartialEq)]
struct ShellProps {
    index: game::ShellIndex,
    shell: game::Shell,
    size: game::Coord,
    ball_visible: bool,
    #[prop_or_default]
    pickable: bool,
    callback: Callback<Msg>,
}

#[function_component(ShellView)]
fn shell_component(props: &ShellProps) -> Html {
    let ShellProps {
        index,
        shell,
        size,
        ball_visible,
        pickable,
        callback,
    } = props;

    let onclick = {
        let index = *index;
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("shell {} clicked", index);
            callback.emit(Msg::Dispatch(Command::Choose(index)));
        })
    };

    let class = classes!("game-shell", pickable.then_some("pickable"));
    let opacity = if *ball_visible { "1" } else { "0" };

    html! {
        <div {class} {onclick} style={shell_style(shell, *size)}>
            <div class="game-ball" style={format!("opacity: {opacity}")}/>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    game: game::ShellGame,
    pending_step: Option<Timeout>,
    error: Option<game::GameError>,
}

impl GameView {
    fn new_game(seed: u64, settings: &settings::Settings) -> game::ShellGame {
        let mut game = game::ShellGame::new(game::GameConfig::default(), seed)
            .expect("default config is valid");
        if let Err(err) = game.set_move_limit(settings.difficulty.move_limit().get()) {
            log::error!("stored difficulty rejected: {}", err);
        }
        game
    }

    /// Replaces any pending step, so at most one timer is alive per table.
    fn schedule(&mut self, ctx: &Context<Self>, command: Command, delay_ms: u32) {
        let link = ctx.link().clone();
        log::trace!("scheduling {:?} in {}ms", command, delay_ms);
        self.pending_step = Some(Timeout::new(delay_ms, move || {
            link.send_message(Msg::Dispatch(command))
        }));
    }

    fn is_start_locked(&self) -> bool {
        is_start_locked(self.game.phase(), self.error)
    }

    /// Runs `command` on the engine, returns whether to redraw and the step to schedule next.
    fn apply_command(&mut self, command: Command) -> (bool, Option<(Command, u32)>) {
        match self.game.apply(command) {
            Ok(event) => {
                log::debug!("{:?}", event);
                if matches!(event, Event::RoundStarted { .. }) {
                    self.error = None;
                }
                let timing = self.game.config().timing;
                (event.has_update(), event.next_step(&timing))
            }
            Err(err) if matches!(command, Command::Step(_)) => {
                log::error!("shuffle stopped, table config cannot fit the shells: {}", err);
                self.pending_step = None;
                self.error = Some(err);
                (true, None)
            }
            Err(err) => {
                log::debug!("{:?} ignored: {}", command, err);
                (false, None)
            }
        }
    }

    fn dispatch(&mut self, ctx: &Context<Self>, command: Command) -> bool {
        let (updated, next) = self.apply_command(command);
        if let Some((next, delay_ms)) = next {
            self.schedule(ctx, next, delay_ms);
        }
        updated
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: settings::Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        Self {
            game: GameView::new_game(seed, &settings),
            settings,
            pending_step: None,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Dispatch(Command::Start) if self.is_start_locked() => false,
            Dispatch(command) => self.dispatch(ctx, command),
            SetDifficulty(difficulty) => {
                if self.settings.difficulty == difficulty {
                    return false;
                }
                self.settings.difficulty = difficulty;
                self.settings.local_save();
                self.dispatch(ctx, Command::SetMoveLimit(difficulty.move_limit().get()))
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let phase = self.game.phase();
        let is_active = phase.is_active();
        let start_locked = self.is_start_locked();
        let board = self.game.config().board;
        let callback = ctx.link().callback(|msg: Msg| msg);

        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Dispatch(Command::Start)
        });
        let cb_difficulty = ctx.link().callback(Msg::SetDifficulty);

        html! {
            <div class="shellgame">
                <h1>{TITLE}</h1>
                <h2 class="game-result-text">{result_text(self.game.choice_outcome())}</h2>
                if let Some(err) = self.error {
                    <p class="game-error">{err.to_string()}</p>
                }
                <DifficultyPicker
                    value={self.settings.difficulty}
                    disabled={start_locked}
                    onchange={cb_difficulty}/>
                <button onclick={cb_start} disabled={start_locked}>{"Start"}</button>
                <div
                    class="game-table"
                    style={format!("width: {}px; height: {}px;", board.width, board.height)}>
                    {
                        for self.game.current_layout().iter().enumerate().map(|(index, &shell)| html! {
                            <ShellView
                                key={index}
                                {index}
                                {shell}
                                size={board.shell_size}
                                ball_visible={is_ball_visible(phase, &shell)}
                                pickable={phase.accepts_guess()}
                                callback={callback.clone()}/>
                        })
                    }
                </div>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_game(seed: u64) -> game::ShellGame {
        let mut game = game::ShellGame::new(game::GameConfig::default(), seed).unwrap();
        game.start_round();
        while game.advance_shuffle().unwrap().has_update() {}
        game
    }

    #[test]
    fn result_banner_follows_choice() {
        let mut game = finished_game(1);
        assert_eq!(result_text(game.choice_outcome()), "\u{a0}");

        let ball = game.initial_layout().ball_index().unwrap();
        game.choose(ball).unwrap();
        assert_eq!(result_text(game.choice_outcome()), "YOU WIN!");

        game.choose((ball + 1) % 3).unwrap();
        assert_eq!(result_text(game.choice_outcome()), "YOU LOSE");
    }

    #[test]
    fn ball_hidden_while_shells_move() {
        let ball = game::Shell::new(0, 0, true);
        let empty = game::Shell::new(0, 0, false);

        assert!(is_ball_visible(Phase::Revealing, &ball));
        assert!(!is_ball_visible(Phase::Shuffling, &ball));
        assert!(!is_ball_visible(Phase::AwaitingGuess, &ball));
        assert!(is_ball_visible(Phase::Resolved, &ball));
        assert!(!is_ball_visible(Phase::Revealing, &empty));
    }

    #[test]
    fn shell_style_positions_with_transform() {
        let shell = game::Shell::new(150, 100, false);

        assert_eq!(
            shell_style(&shell, 100),
            "transform: translate(150px, 100px); width: 100px; height: 100px;"
        );
    }

    #[test]
    fn stored_difficulty_sets_move_limit() {
        let settings = settings::Settings {
            difficulty: game::Difficulty::Expert,
        };

        let game = GameView::new_game(5, &settings);

        assert_eq!(game.move_limit().get(), 10);
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn start_unlocks_after_failed_step() {
        assert!(is_start_locked(Phase::Shuffling, None));
        assert!(!is_start_locked(Phase::Shuffling, Some(game::GameError::PlacementUnsatisfiable)));
        assert!(!is_start_locked(Phase::AwaitingGuess, None));
    }

    #[test]
    fn failed_step_surfaces_error_until_restart() {
        // one shell tall, so shells only fit side by side and placement often runs out of tries
        let config = game::GameConfig::new(
            game::BoardConfig::new(404, 200, 100),
            3,
            game::OverlapPolicy::Proximity,
            game::Timing::default(),
        )
        .unwrap();

        let mut stuck = None;
        for seed in 0..10 {
            let mut view = GameView {
                settings: settings::Settings::default(),
                game: game::ShellGame::new(config, seed).unwrap(),
                pending_step: None,
                error: None,
            };
            view.game.set_move_limit(10).unwrap();
            view.apply_command(Command::Start);
            let epoch = view.game.epoch();

            while view.error.is_none() && view.game.phase().is_active() {
                view.apply_command(Command::Step(epoch));
            }
            if view.error.is_some() {
                stuck = Some(view);
                break;
            }
        }

        let mut view = stuck.expect("some seed should run out of placement tries");
        assert_eq!(view.error, Some(game::GameError::PlacementUnsatisfiable));
        assert!(view.game.phase().is_active());
        assert!(!view.is_start_locked());

        let (updated, next) = view.apply_command(Command::Start);
        assert!(updated);
        assert!(matches!(next, Some((Command::Step(_), _))));
        assert_eq!(view.error, None);
        assert_eq!(view.game.phase(), Phase::Revealing);
    }
}
