use yew::prelude::*;

use super::submit::submit_completion;
use super::GameProps;
use crate::model::{SequenceProgress, SequenceRound, SequenceState};

pub enum Msg {
    Click(u32),
    GiveUp,
    Restart,
}

/// Click the scattered numbers in ascending order. One wrong click ends the
/// round; giving up keeps the points earned so far.
pub struct SequenceComp {
    round: SequenceRound,
}

impl Component for SequenceComp {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            round: SequenceRound::new(ctx.props().activity_id),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Click(value) => match self.round.click(value) {
                SequenceProgress::Ignored => false,
                SequenceProgress::Advanced => true,
                SequenceProgress::Won | SequenceProgress::Lost => {
                    self.report_completion(ctx);
                    true
                }
            },
            Msg::GiveUp => match self.round.give_up() {
                SequenceProgress::Ignored => false,
                _ => {
                    self.report_completion(ctx);
                    true
                }
            },
            Msg::Restart => {
                self.round = SequenceRound::new(ctx.props().activity_id);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let finished = self.round.is_finished();
        let status = match self.round.state() {
            SequenceState::InProgress => match self.round.expected() {
                Some(next) => format!("Find: {next}"),
                None => String::new(),
            },
            SequenceState::Won => format!("You won! Points: {}", self.round.score()),
            SequenceState::Lost => format!("Round over. Points: {}", self.round.score()),
        };

        let cells = self.round.numbers().iter().map(|&value| {
            let cleared = self.round.is_cleared(value);
            let onclick = ctx.link().callback(move |_| Msg::Click(value));
            let class = classes!(
                "cognitiva-secuencia__cell",
                cleared.then_some("cognitiva-secuencia__cell--cleared"),
            );
            html! {
                <button key={value} {class} {onclick} disabled={cleared || finished}>
                    {value}
                </button>
            }
        });

        html! {
            <div class="cognitiva-secuencia">
                <h1 class="cognitiva-secuencia__title">{"Number Sequence"}</h1>
                <p class="cognitiva-secuencia__status">{status}</p>
                <div class="cognitiva-secuencia__grid">
                    { for cells }
                </div>
                <div class="cognitiva-secuencia__controls">
                    if finished {
                        <button
                            class="cognitiva-secuencia__restart"
                            onclick={ctx.link().callback(|_| Msg::Restart)}
                        >
                            {"Play again"}
                        </button>
                    } else {
                        <button
                            class="cognitiva-secuencia__give-up"
                            onclick={ctx.link().callback(|_| Msg::GiveUp)}
                        >
                            {"Give up"}
                        </button>
                    }
                </div>
            </div>
        }
    }
}

impl SequenceComp {
    fn report_completion(&mut self, ctx: &Context<Self>) {
        if let Some(record) = self.round.take_completion() {
            submit_completion(ctx.props().session.clone(), record);
        }
    }
}
