use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome<'a> {
    NoChange,
    Question(&'a str),
    Answer(&'a str),
}

impl<'a> RevealOutcome<'a> {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Question(_) => true,
            Answer(_) => true,
        }
    }

    pub const fn text(self) -> Option<&'a str> {
        use RevealOutcome::*;
        match self {
            NoChange => None,
            Question(text) | Answer(text) => Some(text),
        }
    }

    pub const fn state(self) -> Option<RevealState> {
        use RevealOutcome::*;
        match self {
            NoChange => None,
            Question(_) => Some(RevealState::Question),
            Answer(_) => Some(RevealState::Answer),
        }
    }
}

/// Owner of the board of the current session, the only place where reveal states change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardState {
    board: Board,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.board = Board::default();
    }

    /// Replaces the whole board at once, nothing of the previous board is kept.
    pub fn set(&mut self, board: Board) {
        self.board = board;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    pub fn categories(&self) -> &[Category] {
        self.board.categories()
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn clue_at(&self, pos: CluePos) -> Option<&Clue> {
        self.board.clue_at(pos)
    }

    pub fn reveal_state_at(&self, pos: CluePos) -> Option<RevealState> {
        self.clue_at(pos).map(Clue::reveal_state)
    }

    /// Advances the clue at `pos` one step. Positions outside the board, including any position while the board is
    /// empty, and clues already showing their answer are left untouched.
    pub fn reveal(&mut self, pos: CluePos) -> RevealOutcome<'_> {
        let Some(clue) = self.board.clue_at_mut(pos) else {
            log::trace!("reveal outside board: {:?}", pos);
            return RevealOutcome::NoChange;
        };

        clue.advance()
    }
}
