use gloo::timers::callback::Timeout;
use uuid::Uuid;
use yew::prelude::*;

use super::submit::submit_completion;
use super::GameProps;
use crate::model::{Difficulty, MatchingPairs, MismatchTimer, Selection, MISMATCH_DELAY_MS};

pub enum Msg {
    Start(Difficulty),
    Select(Uuid),
    MismatchElapsed(MismatchTimer),
    Restart,
}

/// Memory game: flip cards, find the pairs. A mismatched pair flips back
/// after one second, during which the board ignores input.
pub struct MatchingPairsComp {
    game: Option<MatchingPairs>,
    /// Live handle for the pending flip-back; dropping it cancels the
    /// browser timer when the component unmounts or the round restarts.
    pending_reset: Option<Timeout>,
}

impl Component for MatchingPairsComp {
    type Message = Msg;
    type Properties = GameProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            game: None,
            pending_reset: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Start(difficulty) => {
                self.pending_reset = None;
                self.game = Some(MatchingPairs::new(ctx.props().activity_id, difficulty));
                true
            }
            Msg::Select(id) => {
                let Some(game) = self.game.as_mut() else {
                    return false;
                };
                match game.select(id) {
                    Selection::Ignored => false,
                    Selection::FirstRevealed => true,
                    Selection::Matched => {
                        self.report_completion(ctx);
                        true
                    }
                    Selection::Mismatch(timer) => {
                        let link = ctx.link().clone();
                        self.pending_reset = Some(Timeout::new(MISMATCH_DELAY_MS, move || {
                            link.send_message(Msg::MismatchElapsed(timer));
                        }));
                        true
                    }
                }
            }
            Msg::MismatchElapsed(timer) => {
                self.pending_reset = None;
                match self.game.as_mut() {
                    Some(game) => game.resolve_mismatch(timer),
                    None => false,
                }
            }
            Msg::Restart => {
                self.pending_reset = None;
                if let Some(game) = self.game.as_mut() {
                    let difficulty = game.difficulty();
                    game.restart(difficulty);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match &self.game {
            None => self.view_difficulty_menu(ctx),
            Some(game) => self.view_board(ctx, game),
        }
    }
}

impl MatchingPairsComp {
    fn report_completion(&mut self, ctx: &Context<Self>) {
        if let Some(record) = self.game.as_mut().and_then(|game| game.take_completion()) {
            submit_completion(ctx.props().session.clone(), record);
        }
    }

    fn view_difficulty_menu(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="cognitiva-pares">
                <h1 class="cognitiva-pares__title">{"Choose a difficulty"}</h1>
                <div class="cognitiva-pares__menu">
                    <button
                        class="cognitiva-pares__difficulty"
                        onclick={ctx.link().callback(|_| Msg::Start(Difficulty::Easy))}
                    >
                        {"Easy"}
                    </button>
                    <button
                        class="cognitiva-pares__difficulty"
                        onclick={ctx.link().callback(|_| Msg::Start(Difficulty::Hard))}
                    >
                        {"Hard"}
                    </button>
                </div>
            </div>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, game: &MatchingPairs) -> Html {
        let cards = game.cards().iter().map(|card| {
            let id = card.id;
            let onclick = ctx.link().callback(move |_| Msg::Select(id));
            let revealed = card.face_up || card.matched;
            let class = classes!(
                "cognitiva-pares__card",
                revealed.then_some("cognitiva-pares__card--revealed"),
                card.matched.then_some("cognitiva-pares__card--matched"),
            );
            html! {
                <button key={id.to_string()} {class} {onclick}>
                    { if revealed { card.symbol } else { "?" } }
                </button>
            }
        });

        html! {
            <div class="cognitiva-pares">
                <h1 class="cognitiva-pares__title">{"Matching Pairs"}</h1>
                <p class="cognitiva-pares__moves">{format!("Moves: {}", game.moves())}</p>
                <div class="cognitiva-pares__grid">
                    { for cards }
                </div>
                if game.is_complete() {
                    <div class="cognitiva-pares__message">
                        <p>{format!("Well done, finished in {} moves!", game.moves())}</p>
                        <button
                            class="cognitiva-pares__restart"
                            onclick={ctx.link().callback(|_| Msg::Restart)}
                        >
                            {"Play again"}
                        </button>
                    </div>
                }
            </div>
        }
    }
}
