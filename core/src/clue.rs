use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{CategoryId, CluePos, RevealOutcome};

/// How much of a clue the player has seen, only ever moves forward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Answer)
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Question),
            Self::Question => Some(Self::Answer),
            Self::Answer => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    reveal_state: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal_state: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    /// Text currently visible on the cell, `None` while hidden.
    pub fn visible_text(&self) -> Option<&str> {
        match self.reveal_state {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }

    /// Moves one step forward and reports the text that became visible.
    pub(crate) fn advance(&mut self) -> RevealOutcome<'_> {
        match self.reveal_state {
            RevealState::Hidden => {
                self.reveal_state = RevealState::Question;
                RevealOutcome::Question(&self.question)
            }
            RevealState::Question => {
                self.reveal_state = RevealState::Answer;
                RevealOutcome::Answer(&self.answer)
            }
            RevealState::Answer => RevealOutcome::NoChange,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(id: CategoryId, title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            id,
            title: title.into(),
            clues,
        }
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub(crate) fn clue_mut(&mut self, index: usize) -> Option<&mut Clue> {
        self.clues.get_mut(index)
    }
}

/// Categories of a single game session, in the order their ids were acquired.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of clue rows, the board is rectangular so the first category decides.
    pub fn rows(&self) -> usize {
        self.categories.first().map_or(0, |category| category.clues.len())
    }

    pub fn clue_at(&self, (category, clue): CluePos) -> Option<&Clue> {
        self.categories.get(category)?.clues.get(clue)
    }

    pub(crate) fn clue_at_mut(&mut self, (category, clue): CluePos) -> Option<&mut Clue> {
        self.categories.get_mut(category)?.clue_mut(clue)
    }

    pub fn is_rectangular(&self) -> bool {
        let rows = self.rows();
        self.categories.iter().all(|c| c.clues.len() == rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn clue_advances_monotonically() {
        let mut clue = Clue::new("2+2", "4");

        assert_eq!(clue.visible_text(), None);
        assert_eq!(clue.advance(), RevealOutcome::Question("2+2"));
        assert_eq!(clue.visible_text(), Some("2+2"));
        assert_eq!(clue.advance(), RevealOutcome::Answer("4"));
        assert_eq!(clue.visible_text(), Some("4"));
        assert_eq!(clue.advance(), RevealOutcome::NoChange);
        assert_eq!(clue.reveal_state(), RevealState::Answer);
        assert_eq!(clue.reveal_state().next(), None);
    }

    #[test]
    fn board_rows_follow_first_category() {
        let board = Board::new(vec![
            Category::new(1, "Math", vec![Clue::new("a", "b"), Clue::new("c", "d")]),
            Category::new(2, "Literature", vec![Clue::new("e", "f"), Clue::new("g", "h")]),
        ]);

        assert_eq!(board.rows(), 2);
        assert!(board.is_rectangular());
        assert_eq!(board.clue_at((1, 1)).map(Clue::question), Some("g"));
        assert_eq!(board.clue_at((2, 0)), None);
        assert_eq!(board.clue_at((0, 2)), None);
    }
}
