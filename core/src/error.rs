use alloc::string::String;
use thiserror::Error;

use crate::CategoryId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Trivia provider request failed: {0}")]
    Provider(String),
    #[error("Category {id} has {found} clues, {needed} needed")]
    NotEnoughClues {
        id: CategoryId,
        found: usize,
        needed: usize,
    },
    #[error("No suitable categories found after {0} attempts")]
    AttemptsExhausted(u32),
}

pub type Result<T> = core::result::Result<T, GameError>;
