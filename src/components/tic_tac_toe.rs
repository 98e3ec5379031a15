use gloo::timers::callback::Timeout;
use yew::prelude::*;

use super::submit::submit_completion;
use super::GameProps;
use crate::model::{GameState, MoveOutcome, OpponentTimer, TicTacToe, OPPONENT_DELAY_MS};

const POINTS_PER_LEVEL: u32 = 50;

pub enum Msg {
    Cell(usize),
    OpponentElapsed(OpponentTimer),
    Reset,
}

/// Tic-tac-toe against a random opponent. Only the player's wins are
/// reported to the backend; the score/level header is display state.
pub struct TicTacToeComp {
    game: TicTacToe,
    pending_opponent: Option<Timeout>,
    total_points: u32,
}

impl Component for TicTacToeComp {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            game: TicTacToe::new(ctx.props().activity_id),
            pending_opponent: None,
            total_points: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Cell(cell) => match self.game.player_move(cell) {
                MoveOutcome::Ignored => false,
                MoveOutcome::OpponentPending(timer) => {
                    let link = ctx.link().clone();
                    self.pending_opponent = Some(Timeout::new(OPPONENT_DELAY_MS, move || {
                        link.send_message(Msg::OpponentElapsed(timer));
                    }));
                    true
                }
                MoveOutcome::Ended(_) => {
                    self.report_completion(ctx);
                    true
                }
            },
            Msg::OpponentElapsed(timer) => {
                self.pending_opponent = None;
                match self.game.opponent_move(timer) {
                    None => false,
                    Some(_) => {
                        self.report_completion(ctx);
                        true
                    }
                }
            }
            Msg::Reset => {
                self.pending_opponent = None;
                self.game.reset();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let level = self.total_points / POINTS_PER_LEVEL + 1;
        let cells = self.game.board().iter().enumerate().map(|(index, cell)| {
            let onclick = ctx.link().callback(move |_| Msg::Cell(index));
            html! {
                <button key={index} class="cognitiva-totito__square" {onclick}>
                    { cell.map(|mark| mark.to_string()).unwrap_or_default() }
                </button>
            }
        });

        html! {
            <div class="cognitiva-totito">
                <div class="cognitiva-totito__scoreboard">
                    <p>{format!("Score: {}", self.total_points)}</p>
                    <p>{format!("Level: {level}")}</p>
                </div>
                <div class="cognitiva-totito__board">
                    { for cells }
                </div>
                if self.game.state() != GameState::InProgress {
                    <div class="cognitiva-totito__message">
                        <h3>{ match self.game.state() {
                            GameState::Won(mark) => format!("Winner: {mark}!"),
                            GameState::Draw => "It's a draw!".to_string(),
                            GameState::InProgress => String::new(),
                        } }</h3>
                        <button
                            class="cognitiva-totito__reset"
                            onclick={ctx.link().callback(|_| Msg::Reset)}
                        >
                            {"Play again"}
                        </button>
                    </div>
                }
            </div>
        }
    }
}

impl TicTacToeComp {
    fn report_completion(&mut self, ctx: &Context<Self>) {
        if let Some(record) = self.game.take_completion() {
            self.total_points += record.score;
            submit_completion(ctx.props().session.clone(), record);
        }
    }
}
