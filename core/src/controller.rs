use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Loading,
    Ready,
}

impl Lifecycle {
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Label of the single start/restart button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affordance {
    Start,
    Restart,
}

impl Affordance {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Restart => "Restart",
        }
    }
}

/// Instructions for the presentation layer, queued by the controller in the order they must be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEffect {
    ShowLoading,
    HideLoading,
    /// The start button is taken away until a matching `AttachAffordance`.
    DetachAffordance,
    AttachAffordance(Affordance),
    /// The whole grid must be drawn again from the board, every cell showing its placeholder.
    RenderBoard,
    RenderCell { pos: CluePos, text: String },
    /// Purely cosmetic highlight of a freshly revealed answer, to be undone after `delay_ms`.
    ScheduleAnswerEffect { pos: CluePos, delay_ms: u32 },
    NotifyError(String),
}

/// Drives one board through its lifecycle: loading, playing, and starting over.
#[derive(Debug)]
pub struct BoardController {
    config: GameConfig,
    state: BoardState,
    lifecycle: Lifecycle,
    effects: Vec<UiEffect>,
}

impl BoardController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: BoardState::new(),
            lifecycle: Lifecycle::NotStarted,
            effects: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Whether the start button is currently available, and with which label.
    pub fn affordance(&self) -> Option<Affordance> {
        match self.lifecycle {
            Lifecycle::NotStarted => Some(Affordance::Start),
            Lifecycle::Loading => None,
            Lifecycle::Ready => Some(Affordance::Restart),
        }
    }

    /// Drains the effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<UiEffect> {
        mem::take(&mut self.effects)
    }

    /// First half of a start: discards the current board and enters `Loading`. Returns the acquirer that must be
    /// driven to completion and handed to [`Self::finish_start`], or `None` when a start is already in flight.
    pub fn begin_start(&mut self, seed: u64) -> Option<CategoryAcquirer> {
        if self.lifecycle.is_loading() {
            log::warn!("Start requested while loading, ignored");
            return None;
        }

        log::debug!("{:?} -> Loading (seed: {})", self.lifecycle, seed);
        self.state.reset();
        self.lifecycle = Lifecycle::Loading;
        self.effects.push(UiEffect::ShowLoading);
        self.effects.push(UiEffect::DetachAffordance);

        Some(CategoryAcquirer::new(seed, self.config))
    }

    /// Second half of a start, installs the board or reports why there is none.
    pub fn finish_start(&mut self, outcome: Result<Board>) {
        if !self.lifecycle.is_loading() {
            log::warn!("Board arrived while {:?}, discarded", self.lifecycle);
            return;
        }

        match outcome {
            Ok(board) => {
                log::debug!("Loading -> Ready ({} categories)", board.categories().len());
                self.state.set(board);
                self.lifecycle = Lifecycle::Ready;
                self.effects.push(UiEffect::RenderBoard);
                self.effects.push(UiEffect::HideLoading);
                self.effects.push(UiEffect::AttachAffordance(Affordance::Restart));
            }
            Err(err) => {
                log::error!("Could not load board: {}", err);
                self.state.reset();
                self.lifecycle = Lifecycle::NotStarted;
                self.effects.push(UiEffect::NotifyError(err.to_string()));
                self.effects.push(UiEffect::HideLoading);
                self.effects.push(UiEffect::AttachAffordance(Affordance::Start));
            }
        }
    }

    /// Runs a whole start against `provider`. Returns `false` when the start was refused because one is in flight.
    pub async fn start<P: TriviaProvider>(&mut self, provider: &P, seed: u64) -> bool {
        let Some(acquirer) = self.begin_start(seed) else {
            return false;
        };
        let outcome = acquirer.acquire_board(provider).await;
        self.finish_start(outcome);
        true
    }

    /// Advances the clicked clue. Clicks outside `Ready` or outside the board are ignored. Returns the new reveal
    /// state when the clue changed.
    pub fn handle_cell_click(&mut self, pos: CluePos) -> Option<RevealState> {
        if !self.lifecycle.is_ready() {
            log::trace!("click on {:?} while {:?}, ignored", pos, self.lifecycle);
            return None;
        }

        let delay_ms = self.config.answer_effect_delay_ms;
        let (state, text) = match self.state.reveal(pos) {
            RevealOutcome::NoChange => return None,
            RevealOutcome::Question(text) => (RevealState::Question, text.to_string()),
            RevealOutcome::Answer(text) => (RevealState::Answer, text.to_string()),
        };
        log::trace!("clue {:?} -> {:?}", pos, state);

        self.effects.push(UiEffect::RenderCell { pos, text });
        if state.is_terminal() {
            self.effects
                .push(UiEffect::ScheduleAnswerEffect { pos, delay_ms });
        }

        Some(state)
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
