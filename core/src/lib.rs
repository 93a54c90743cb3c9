#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use acquire::*;
pub use board::*;
pub use clue::*;
pub use controller::*;
pub use error::*;
pub use provider::*;
pub use types::*;

mod acquire;
mod board;
mod clue;
mod controller;
mod error;
mod provider;
mod types;

/// Board constants. Deserialized configs go through [`GameConfig::new`] and get the same clamps.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "GameConfigFields")]
pub struct GameConfig {
    /// Number of categories (columns) on a board.
    pub categories: usize,
    /// Number of clues kept per category (rows).
    pub clues_per_category: usize,
    /// A category is only accepted when its source has at least this many clues.
    pub min_source_clues: usize,
    /// Upper bound (inclusive) of the category ids drawn at random, the lower bound is 1.
    pub id_range: CategoryId,
    /// Delay before the cosmetic effect that follows an answer reveal is undone.
    pub answer_effect_delay_ms: u32,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked(6, 5, 5, 28163, 1500);

    pub const fn new_unchecked(
        categories: usize,
        clues_per_category: usize,
        min_source_clues: usize,
        id_range: CategoryId,
        answer_effect_delay_ms: u32,
    ) -> Self {
        Self {
            categories,
            clues_per_category,
            min_source_clues,
            id_range,
            answer_effect_delay_ms,
            retry: RetryPolicy::UNBOUNDED,
        }
    }

    /// Builds a config that can always be satisfied by a dense enough provider: at least one category and one clue,
    /// never fewer ids than categories, and a source threshold that covers the clues kept.
    pub fn new(
        categories: usize,
        clues_per_category: usize,
        min_source_clues: usize,
        id_range: CategoryId,
        answer_effect_delay_ms: u32,
    ) -> Self {
        let categories = categories.max(1);
        let clues_per_category = clues_per_category.max(1);
        let min_source_clues = min_source_clues.max(clues_per_category);
        let id_range = id_range.max(categories.try_into().unwrap_or(CategoryId::MAX));
        Self::new_unchecked(
            categories,
            clues_per_category,
            min_source_clues,
            id_range,
            answer_effect_delay_ms,
        )
    }

    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub const fn total_cells(&self) -> usize {
        self.categories.saturating_mul(self.clues_per_category)
    }
}

#[derive(Deserialize)]
struct GameConfigFields {
    categories: usize,
    clues_per_category: usize,
    min_source_clues: usize,
    id_range: CategoryId,
    answer_effect_delay_ms: u32,
    #[serde(default)]
    retry: RetryPolicy,
}

impl From<GameConfigFields> for GameConfig {
    fn from(fields: GameConfigFields) -> Self {
        Self::new(
            fields.categories,
            fields.clues_per_category,
            fields.min_source_clues,
            fields.id_range,
            fields.answer_effect_delay_ms,
        )
        .with_retry(fields.retry)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bound on the number of random draws made while looking for suitable categories.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const UNBOUNDED: Self = Self { max_attempts: None };

    pub const fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub const fn allows(self, attempts: u32) -> bool {
        match self.max_attempts {
            None => true,
            Some(max) => attempts < max,
        }
    }
}
