use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::*;

/// One dealt word. `position` is the index it was dealt at and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordCard {
    text: String,
    position: usize,
    used: bool,
}

impl WordCard {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub const fn is_used(&self) -> bool {
        self.used
    }
}

/// The sixteen dealt words and which of them already belong to a found category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleBoard {
    cards: Vec<WordCard>,
}

impl PuzzleBoard {
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoard);
        }

        let distinct: BTreeSet<&str> = words.iter().map(String::as_str).collect();
        if distinct.len() != BOARD_SIZE {
            return Err(GameError::InvalidBoard);
        }

        let cards = words
            .into_iter()
            .enumerate()
            .map(|(position, text)| WordCard {
                text,
                position,
                used: false,
            })
            .collect();

        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[WordCard] {
        &self.cards
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(WordCard::text)
    }

    pub fn card(&self, word: &str) -> Option<&WordCard> {
        self.cards.iter().find(|card| card.text == word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.card(word).is_some()
    }

    pub fn is_used(&self, word: &str) -> bool {
        self.card(word).is_some_and(WordCard::is_used)
    }

    pub fn unused_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.used).count()
    }

    /// Checks that `word` is on the board and still free.
    pub fn validate_free(&self, word: &str) -> Result<()> {
        match self.card(word) {
            None => Err(GameError::UnknownWord),
            Some(card) if card.used => Err(GameError::WordUsed),
            Some(_) => Ok(()),
        }
    }

    pub(crate) fn mark_used(&mut self, word: &str) -> Result<()> {
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.text == word)
            .ok_or(GameError::UnknownWord)?;
        if card.used {
            return Err(GameError::WordUsed);
        }
        card.used = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fruit_words;
    use alloc::string::ToString;

    #[test]
    fn positions_follow_dealing_order() {
        let board = PuzzleBoard::new(fruit_words()).unwrap();

        for (index, card) in board.cards().iter().enumerate() {
            assert_eq!(card.position(), index);
            assert!(!card.is_used());
        }
    }

    #[test]
    fn rejects_wrong_size_and_duplicates() {
        let mut short = fruit_words();
        short.pop();
        assert_eq!(PuzzleBoard::new(short), Err(GameError::InvalidBoard));

        let mut duplicated = fruit_words();
        duplicated[15] = duplicated[0].clone();
        assert_eq!(PuzzleBoard::new(duplicated), Err(GameError::InvalidBoard));
    }

    #[test]
    fn mark_used_only_once() {
        let mut board = PuzzleBoard::new(fruit_words()).unwrap();

        assert_eq!(board.mark_used("Apple"), Ok(()));
        assert!(board.is_used("Apple"));
        assert_eq!(board.mark_used("Apple"), Err(GameError::WordUsed));
        assert_eq!(board.mark_used("Nope"), Err(GameError::UnknownWord));
        assert_eq!(board.unused_count(), BOARD_SIZE - 1);
        assert_eq!(board.validate_free(&"Apple".to_string()), Err(GameError::WordUsed));
    }
}
