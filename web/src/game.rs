use std::collections::{BTreeMap, BTreeSet};

use crate::api::{self, JServiceProvider};
use crate::utils::*;
use clap::Args;
use cluegrid_core as game;
use game::{
    Affordance, BoardController, BoardState, CategoryAcquirer, CluePos, RevealState, UiEffect,
};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

/// Shown on every cell until its clue is revealed.
const PLACEHOLDER: &str = "?";

#[derive(Clone, Debug, PartialEq)]
enum BrowserAction {
    Alert(String),
    StartTimer { pos: CluePos, delay_ms: u32 },
}

/// What the page shows, built only from the controller's effects.
#[derive(Clone, Debug, PartialEq)]
struct Presentation {
    loading: bool,
    affordance: Option<Affordance>,
    cells: BTreeMap<CluePos, String>,
    emphasized: BTreeSet<CluePos>,
}

impl Presentation {
    fn new() -> Self {
        Self {
            loading: false,
            affordance: Some(Affordance::Start),
            cells: BTreeMap::new(),
            emphasized: BTreeSet::new(),
        }
    }

    fn apply(&mut self, effect: UiEffect) -> Option<BrowserAction> {
        use UiEffect::*;

        log::trace!("effect: {:?}", effect);
        match effect {
            ShowLoading => self.loading = true,
            HideLoading => self.loading = false,
            DetachAffordance => self.affordance = None,
            AttachAffordance(affordance) => self.affordance = Some(affordance),
            RenderBoard => {
                self.cells.clear();
                self.emphasized.clear();
            }
            RenderCell { pos, text } => {
                self.cells.insert(pos, text);
            }
            ScheduleAnswerEffect { pos, delay_ms } => {
                self.emphasized.insert(pos);
                return Some(BrowserAction::StartTimer { pos, delay_ms });
            }
            NotifyError(message) => {
                return Some(BrowserAction::Alert(format!(
                    "Could not load the board: {message}"
                )));
            }
        }
        None
    }

    fn cell_text(&self, pos: CluePos) -> &str {
        self.cells.get(&pos).map_or(PLACEHOLDER, String::as_str)
    }

    fn cell_classes(&self, pos: CluePos, reveal_state: RevealState) -> Classes {
        let mut class = classes!(
            "cell",
            match reveal_state {
                RevealState::Hidden => classes!(),
                RevealState::Question => classes!("question"),
                RevealState::Answer => classes!("answer"),
            }
        );
        if self.emphasized.contains(&pos) {
            class.push("emphasized");
        }
        class
    }
}

/// Upper-cased category titles, one per column.
fn header_titles(state: &BoardState) -> Vec<String> {
    state
        .categories()
        .iter()
        .map(|category| category.title().to_uppercase())
        .collect()
}

/// Cell positions in table order: one row per clue slot, categories as columns.
fn grid_positions(state: &BoardState) -> Vec<Vec<CluePos>> {
    let columns = state.categories().len();
    (0..state.rows())
        .map(|row| (0..columns).map(|column| (column, row)).collect())
        .collect()
}

/// Starts a board with the next seed. A refused start leaves a forced seed in place for the next one.
fn begin_start(
    controller: &mut BoardController,
    seeds: &mut SeedSource,
) -> Option<CategoryAcquirer> {
    let acquirer = controller.begin_start(seeds.candidate())?;
    seeds.commit();
    Some(acquirer)
}

pub(crate) enum Msg {
    Start,
    BoardLoaded(game::Result<game::Board>),
    CellClick(CluePos),
    AnswerEffectElapsed(CluePos),
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    pos: CluePos,
    text: AttrValue,
    class: Classes,
    callback: Callback<CluePos>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        pos,
        text,
        class,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} click", pos);
        callback.emit(pos);
    });

    html! {
        <td {class} {onclick}>{text.as_str()}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first board instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Base URL of the trivia API
    #[arg(long, default_value = api::DEFAULT_API_BASE)]
    pub api: String,
}

pub(crate) struct BoardView {
    controller: game::BoardController,
    provider: JServiceProvider,
    seeds: SeedSource,
    presentation: Presentation,
    answer_timers: BTreeMap<CluePos, Timeout>,
}

impl BoardView {
    fn start(&mut self, ctx: &Context<Self>) {
        let Some(acquirer) = begin_start(&mut self.controller, &mut self.seeds) else {
            return;
        };

        let provider = self.provider.clone();
        ctx.link().send_future(async move {
            let outcome = acquirer.acquire_board(&provider).await;
            Msg::BoardLoaded(outcome)
        });
    }

    /// Applies the controller's pending effects, returns whether anything visible changed.
    fn flush_effects(&mut self, ctx: &Context<Self>) -> bool {
        let effects = self.controller.take_effects();
        let updated = !effects.is_empty();

        for effect in effects {
            if matches!(effect, UiEffect::RenderBoard) {
                self.answer_timers.clear();
            }
            match self.presentation.apply(effect) {
                None => {}
                Some(BrowserAction::Alert(message)) => gloo::dialogs::alert(&message),
                Some(BrowserAction::StartTimer { pos, delay_ms }) => {
                    let link = ctx.link().clone();
                    let timer = Timeout::new(delay_ms, move || {
                        link.send_message(Msg::AnswerEffectElapsed(pos))
                    });
                    self.answer_timers.insert(pos, timer);
                }
            }
        }

        updated
    }

    fn view_grid(&self, ctx: &Context<Self>) -> Html {
        let state = self.controller.state();
        if state.is_empty() {
            return html! {};
        }

        let callback = ctx.link().callback(Msg::CellClick);

        html! {
            <table class="board">
                <thead>
                    <tr>
                        { for header_titles(state).into_iter().map(|title| html! { <th>{title}</th> }) }
                    </tr>
                </thead>
                <tbody>
                    {
                        for grid_positions(state).into_iter().map(|row| html! {
                            <tr>
                                {
                                    for row.into_iter().map(|pos| {
                                        let reveal_state = state
                                            .reveal_state_at(pos)
                                            .unwrap_or_default();
                                        let text = AttrValue::from(self.presentation.cell_text(pos).to_string());
                                        let class = self.presentation.cell_classes(pos, reveal_state);
                                        let callback = callback.clone();
                                        html! {
                                            <CellView key={format!("{}-{}", pos.0, pos.1)} {pos} {text} {class} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            controller: game::BoardController::default(),
            provider: JServiceProvider::new(&props.api),
            seeds: SeedSource::new(props.seed),
            presentation: Presentation::new(),
            answer_timers: BTreeMap::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => {
                log::debug!("start requested");
                self.start(ctx);
            }
            BoardLoaded(outcome) => {
                self.controller.finish_start(outcome);
            }
            CellClick(pos) => {
                self.controller.handle_cell_click(pos);
            }
            AnswerEffectElapsed(pos) => {
                self.answer_timers.remove(&pos);
                return self.presentation.emphasized.remove(&pos);
            }
        }

        self.flush_effects(ctx)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Presentation {
            loading,
            affordance,
            ..
        } = &self.presentation;

        let button = match affordance {
            Some(affordance) => {
                let onclick = ctx.link().callback(|e: MouseEvent| {
                    e.stop_propagation();
                    Msg::Start
                });
                html! { <button {onclick}>{affordance.label()}</button> }
            }
            None => html! { <button disabled=true>{Affordance::Start.label()}</button> },
        };

        html! {
            <div class="cluegrid">
                <nav>
                    {button}
                    if *loading {
                        <progress class="loading"/>
                    }
                </nav>
                {self.view_grid(ctx)}
            </div>
        }
    }
}
