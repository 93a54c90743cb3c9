use alloc::collections::BTreeSet;
use alloc::string::ToString;
use alloc::vec::Vec;
use rand::prelude::*;

use crate::*;

/// Draws random category ids until enough suitable ones are found, then fetches them into a board.
///
/// Ids are drawn uniformly from `1..=id_range`. Draws that land on a missing category, a category with too few
/// clues, or an id already accepted are discarded and retried, by default without any bound.
#[derive(Clone, Debug)]
pub struct CategoryAcquirer {
    config: GameConfig,
    rng: SmallRng,
}

impl CategoryAcquirer {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Collects `count` distinct ids whose categories advertise at least `min_clue_count` clues, in the order they
    /// were accepted. Provider errors abort immediately, only misses are retried.
    pub async fn acquire_category_ids<P: TriviaProvider>(
        &mut self,
        provider: &P,
        count: usize,
        min_clue_count: usize,
        id_range: CategoryId,
    ) -> Result<Vec<CategoryId>> {
        let id_range = id_range.max(1);
        let mut accepted = BTreeSet::new();
        let mut ids = Vec::with_capacity(count);
        let mut attempts: u32 = 0;

        while ids.len() < count {
            if !self.config.retry.allows(attempts) {
                log::warn!(
                    "Giving up after {} draws, found {} of {} categories",
                    attempts,
                    ids.len(),
                    count
                );
                return Err(GameError::AttemptsExhausted(attempts));
            }
            attempts = attempts.saturating_add(1);

            let id: CategoryId = self.rng.random_range(1..=id_range);
            if accepted.contains(&id) {
                log::trace!("draw {}: id {} already taken", attempts, id);
                continue;
            }

            let category = provider
                .category(id)
                .await
                .map_err(|err| GameError::Provider(err.to_string()))?;

            match category {
                None => log::trace!("draw {}: no category with id {}", attempts, id),
                Some(category) if category.clues_count < min_clue_count => log::trace!(
                    "draw {}: category {} has only {} clues",
                    attempts,
                    id,
                    category.clues_count
                ),
                Some(_) => {
                    log::trace!("draw {}: accepted category {}", attempts, id);
                    accepted.insert(id);
                    ids.push(id);
                }
            }
        }

        log::debug!("Found {} categories in {} draws", ids.len(), attempts);
        Ok(ids)
    }

    /// Fetches a category and keeps its first `clues_per_category` clues, all hidden.
    pub async fn acquire_category<P: TriviaProvider>(
        &self,
        provider: &P,
        id: CategoryId,
        clues_per_category: usize,
    ) -> Result<Category> {
        let source = provider
            .category(id)
            .await
            .map_err(|err| GameError::Provider(err.to_string()))?
            .ok_or_else(|| GameError::Provider(alloc::format!("category {id} not found")))?;

        category_from_source(source, clues_per_category)
    }

    /// Builds a full board with the configured shape. Categories are fetched one after another, in the order their
    /// ids were accepted, and the first failure discards everything fetched so far.
    pub async fn acquire_board<P: TriviaProvider>(mut self, provider: &P) -> Result<Board> {
        let GameConfig {
            categories,
            clues_per_category,
            min_source_clues,
            id_range,
            ..
        } = self.config;

        let ids = self
            .acquire_category_ids(provider, categories, min_source_clues, id_range)
            .await?;

        let mut fetched = Vec::with_capacity(ids.len());
        for id in ids {
            fetched.push(self.acquire_category(provider, id, clues_per_category).await?);
        }

        Ok(Board::new(fetched))
    }
}

fn category_from_source(source: SourceCategory, clues_per_category: usize) -> Result<Category> {
    let SourceCategory {
        id, title, clues, ..
    } = source;

    if clues.len() < clues_per_category {
        log::warn!(
            "Category {} lists {} clues but {} are needed",
            id,
            clues.len(),
            clues_per_category
        );
        return Err(GameError::NotEnoughClues {
            id,
            found: clues.len(),
            needed: clues_per_category,
        });
    }

    let clues = clues
        .into_iter()
        .take(clues_per_category)
        .map(|clue| Clue::new(clue.question, clue.answer))
        .collect();

    Ok(Category::new(id, title, clues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use alloc::string::String;
    use alloc::vec;
    use futures::executor::block_on;

    /// Ids 1..=12 exist, only the even ones have enough clues.
    fn sparse_provider() -> MockProvider {
        (1..=12).fold(MockProvider::new(), |provider, id| {
            let clues = if id % 2 == 0 { 7 } else { 2 };
            provider.with_category(id, "Category", clues)
        })
    }

    fn small_config() -> GameConfig {
        GameConfig::new(6, 5, 5, 20, 0)
    }

    #[test]
    fn ids_are_distinct_and_have_enough_clues() {
        let provider = sparse_provider();

        for seed in 0..16 {
            let mut acquirer = CategoryAcquirer::new(seed, small_config());
            let ids = block_on(acquirer.acquire_category_ids(&provider, 6, 5, 20)).unwrap();

            assert_eq!(ids.len(), 6);
            assert!(ids.iter().all(|id| id % 2 == 0 && *id <= 12));
            assert_eq!(ids.iter().collect::<BTreeSet<_>>().len(), 6);
        }
    }

    #[test]
    fn misses_are_retried_until_every_suitable_id_is_found() {
        let provider = sparse_provider();
        let mut acquirer = CategoryAcquirer::new(42, small_config());

        let ids = block_on(acquirer.acquire_category_ids(&provider, 6, 5, 20)).unwrap();

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, [2, 4, 6, 8, 10, 12]);
        assert!(provider.calls() >= 6);
    }

    #[test]
    fn same_seed_replays_same_ids() {
        let provider = sparse_provider();

        let first = block_on(CategoryAcquirer::new(7, small_config()).acquire_category_ids(&provider, 3, 5, 20));
        let second = block_on(CategoryAcquirer::new(7, small_config()).acquire_category_ids(&provider, 3, 5, 20));

        assert_eq!(first, second);
    }

    #[test]
    fn provider_error_during_id_draws_is_not_retried() {
        let provider = sparse_provider().failing_from(1);
        let mut acquirer = CategoryAcquirer::new(1, small_config());

        let result = block_on(acquirer.acquire_category_ids(&provider, 6, 5, 20));

        assert!(matches!(result, Err(GameError::Provider(_))));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn bounded_retry_gives_up() {
        let provider = MockProvider::new().with_category(1, "Lonely", 5);
        let config = small_config().with_retry(RetryPolicy::bounded(25));
        let mut acquirer = CategoryAcquirer::new(3, config);

        let result = block_on(acquirer.acquire_category_ids(&provider, 2, 5, 20));

        assert_eq!(result, Err(GameError::AttemptsExhausted(25)));
    }

    #[test]
    fn category_keeps_first_clues_in_order() {
        let mut provider = MockProvider::new();
        provider.insert(
            5,
            "Math",
            vec![
                SourceClue {
                    question: String::from("2+2"),
                    answer: String::from("4"),
                },
                SourceClue {
                    question: String::from("1+1"),
                    answer: String::from("2"),
                },
                SourceClue {
                    question: String::from("3+3"),
                    answer: String::from("6"),
                },
            ],
        );
        let acquirer = CategoryAcquirer::new(0, small_config());

        let category = block_on(acquirer.acquire_category(&provider, 5, 2)).unwrap();

        assert_eq!(category.id(), 5);
        assert_eq!(category.title(), "Math");
        let questions: Vec<_> = category.clues().iter().map(Clue::question).collect();
        assert_eq!(questions, ["2+2", "1+1"]);
        assert!(category.clues().iter().all(|clue| clue.reveal_state().is_hidden()));
    }

    #[test]
    fn short_category_is_rejected() {
        let provider = MockProvider::new().with_category(5, "Short", 3);
        let acquirer = CategoryAcquirer::new(0, small_config());

        let result = block_on(acquirer.acquire_category(&provider, 5, 5));

        assert_eq!(
            result,
            Err(GameError::NotEnoughClues {
                id: 5,
                found: 3,
                needed: 5
            })
        );
    }

    #[test]
    fn board_has_configured_shape_in_acquisition_order() {
        let provider = sparse_provider();
        let acquirer = CategoryAcquirer::new(99, small_config());

        let board = block_on(acquirer.acquire_board(&provider)).unwrap();

        assert_eq!(board.categories().len(), 6);
        assert!(board.categories().iter().all(|c| c.clues().len() == 5));
        assert!(board.is_rectangular());

        let board_ids: Vec<_> = board.categories().iter().map(Category::id).collect();
        let requested = provider.requested();
        let fetch_order = &requested[requested.len() - 6..];
        assert_eq!(board_ids, fetch_order);
    }

    #[test]
    fn failed_category_fetch_aborts_board() {
        let provider = MockProvider::new()
            .with_category(1, "Math", 5)
            .failing_from(2);
        let config = GameConfig::new(1, 5, 5, 1, 0);

        let result = block_on(CategoryAcquirer::new(0, config).acquire_board(&provider));

        assert!(matches!(result, Err(GameError::Provider(_))));
    }
}
