use crate::utils::*;
use serde::{Deserialize, Serialize};
use shellgame_core as game;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub difficulty: game::Difficulty,
}

impl StorageKey for Settings {
    const KEY: &'static str = "shellgame:settings:v1";
}

/// Maps a `<select>` option value (the move count) back to its preset.
pub(crate) fn parse_difficulty(value: &str) -> Option<game::Difficulty> {
    let moves = value.parse::<u8>().ok()?;
    let limit = game::MoveLimit::new(moves).ok()?;
    game::Difficulty::from_move_limit(limit)
}

#[derive(Properties, PartialEq)]
pub(crate) struct DifficultyProps {
    pub value: game::Difficulty,
    #[prop_or_default]
    pub disabled: bool,
    pub onchange: Callback<game::Difficulty>,
}

#[function_component(DifficultyPicker)]
pub(crate) fn difficulty_picker(props: &DifficultyProps) -> Html {
    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            match parse_difficulty(&value) {
                Some(difficulty) => callback.emit(difficulty),
                None => log::warn!("unknown difficulty option: {:?}", value),
            }
        })
    };

    html! {
        <select {onchange} disabled={props.disabled}>
            {
                for game::Difficulty::ALL.into_iter().map(|difficulty| {
                    let moves = difficulty.move_limit().get().to_string();
                    html! {
                        <option value={moves} selected={difficulty == props.value}>
                            {difficulty.label()}
                        </option>
                    }
                })
            }
        </select>
    }
}
