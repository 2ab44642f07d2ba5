use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Selected,
    Deselected,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Selected | Self::Deselected => true,
        }
    }
}

/// Words the player has picked for the next guess, in click order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    words: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= GROUP_SIZE
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Removes `word` if present, otherwise appends it while there is room.
    /// A fifth pick is ignored rather than treated as an error.
    pub fn toggle(&mut self, word: &str) -> SelectOutcome {
        if let Some(index) = self.words.iter().position(|w| w == word) {
            self.words.remove(index);
            SelectOutcome::Deselected
        } else if self.is_full() {
            SelectOutcome::NoChange
        } else {
            self.words.push(word.to_string());
            SelectOutcome::Selected
        }
    }

    pub fn clear(&mut self) -> SelectOutcome {
        if self.words.is_empty() {
            SelectOutcome::NoChange
        } else {
            self.words.clear();
            SelectOutcome::Deselected
        }
    }

    /// The selection as a complete group, if it has exactly four words.
    pub fn as_group(&self) -> Option<[String; GROUP_SIZE]> {
        self.words.clone().try_into().ok()
    }
}
