use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// One slot of the visual grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEntry {
    /// A word that has not been solved yet.
    Word(String),
    /// A solved category, by discovery index.
    Category(usize),
}

impl GridEntry {
    pub const fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }

    pub fn word(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word),
            Self::Category(_) => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutOutcome {
    NoChange,
    Replaced { row_start: usize },
}

impl LayoutOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Replaced { .. })
    }
}

/// Ordered grid of category blocks and remaining word cards.
///
/// After every mutation all category blocks form a leading run, followed by the
/// words that are still in play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridLayout {
    entries: Vec<GridEntry>,
}

impl GridLayout {
    pub fn new<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            entries: words.into_iter().map(|w| GridEntry::Word(w.into())).collect(),
        }
    }

    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of_word(&self, word: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.word() == Some(word))
    }

    pub fn remaining_words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(GridEntry::word)
    }

    /// Swaps the four `words` for a single block of `category`, inserted at the start
    /// of the row the earliest of them occupied.
    ///
    /// If any word cannot be found the grid is out of sync with the board and nothing
    /// is changed.
    pub fn replace_with_category(&mut self, category: usize, words: &[String]) -> LayoutOutcome {
        let mut indices: Vec<usize> = words
            .iter()
            .filter_map(|word| self.index_of_word(word))
            .collect();
        indices.sort_unstable();
        indices.dedup();

        if indices.len() != GROUP_SIZE || words.len() != GROUP_SIZE {
            log::warn!(
                "category {} matched {} grid words, leaving layout untouched",
                category,
                indices.len()
            );
            return LayoutOutcome::NoChange;
        }

        let row_start = indices[0] / ROW_WIDTH * ROW_WIDTH;

        for &index in indices.iter().rev() {
            self.entries.remove(index);
        }

        let insert_at = row_start.min(self.entries.len());
        self.entries.insert(insert_at, GridEntry::Category(category));
        self.normalize();

        LayoutOutcome::Replaced { row_start }
    }

    /// Moves all category blocks ahead of the words, keeping the relative order of each group.
    pub fn normalize(&mut self) {
        let (mut categories, words): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(GridEntry::is_category);
        categories.extend(words);
        self.entries = categories;
    }

    /// Permutes the remaining words in place. Category blocks keep their slots.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let slots: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_category())
            .map(|(index, _)| index)
            .collect();

        let mut words: Vec<GridEntry> = slots
            .iter()
            .map(|&index| self.entries[index].clone())
            .collect();
        words.shuffle(rng);

        for (index, entry) in slots.into_iter().zip(words) {
            self.entries[index] = entry;
        }
    }
}
