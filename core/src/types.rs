/// Identifier of a category on the trivia service.
pub type CategoryId = u32;

/// Cell address `(category_index, clue_index)`, category is the column and clue the row.
pub type CluePos = (usize, usize);
