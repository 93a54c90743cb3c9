use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;
use core::future::Future;
use serde::{Deserialize, Serialize};

use crate::CategoryId;

/// Category as served by the trivia service, before trimming.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCategory {
    pub id: CategoryId,
    pub title: String,
    /// Clue count advertised by the service, used to accept or reject a category.
    pub clues_count: usize,
    #[serde(default)]
    pub clues: Vec<SourceClue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClue {
    pub question: String,
    pub answer: String,
}

/// Source of trivia categories.
///
/// Lookups resolve to `Ok(None)` when the service has no category under that id, which callers treat as a miss
/// rather than a failure.
pub trait TriviaProvider {
    type Error: Display;

    fn category(
        &self,
        id: CategoryId,
    ) -> impl Future<Output = core::result::Result<Option<SourceCategory>, Self::Error>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_category_parses_service_payload() {
        let payload = r#"{
            "id": 11496,
            "title": "literature",
            "clues_count": 2,
            "clues": [
                {"id": 1, "answer": "Shakespeare", "question": "Wrote Hamlet", "value": 200, "category_id": 11496},
                {"id": 2, "answer": "Tolstoy", "question": "Wrote War and Peace", "value": null, "category_id": 11496}
            ]
        }"#;

        let category: SourceCategory = serde_json::from_str(payload).unwrap();

        assert_eq!(category.id, 11496);
        assert_eq!(category.title, "literature");
        assert_eq!(category.clues_count, 2);
        assert_eq!(category.clues[1].answer, "Tolstoy");
    }

    #[test]
    fn missing_clue_list_defaults_to_empty() {
        let category: SourceCategory =
            serde_json::from_str(r#"{"id": 3, "title": "empty", "clues_count": 0}"#).unwrap();

        assert!(category.clues.is_empty());
    }

    #[test]
    fn mock_records_requests_and_injects_failures() {
        let provider = mock::MockProvider::new()
            .with_category(1, "Math", 5)
            .failing_from(2);

        let first = futures::executor::block_on(provider.category(1)).unwrap();
        assert_eq!(first.map(|c| c.clues_count), Some(5));
        assert!(futures::executor::block_on(provider.category(1)).is_err());
        assert_eq!(provider.calls(), 2);
        assert_eq!(provider.requested(), [1, 1]);
    }
}
