use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryColor {
    Yellow,
    Green,
    Blue,
    Purple,
}

impl CategoryColor {
    pub const PALETTE: [Self; 4] = [Self::Yellow, Self::Green, Self::Blue, Self::Purple];

    /// Color for the category discovered at `index`, cycling through the palette.
    pub const fn from_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub const fn class_name(self) -> &'static str {
        use CategoryColor::*;
        match self {
            Yellow => "yellow",
            Green => "green",
            Blue => "blue",
            Purple => "purple",
        }
    }
}

/// A solved group of words, in the order it was discovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub words: [String; GROUP_SIZE],
    pub color: CategoryColor,
}

impl Category {
    pub fn new(name: String, words: [String; GROUP_SIZE], index: usize) -> Self {
        Self {
            name,
            words,
            color: CategoryColor::from_index(index),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle_in_discovery_order() {
        assert_eq!(CategoryColor::from_index(0), CategoryColor::Yellow);
        assert_eq!(CategoryColor::from_index(3), CategoryColor::Purple);
        assert_eq!(CategoryColor::from_index(4), CategoryColor::Yellow);
        assert_eq!(CategoryColor::from_index(6).class_name(), "blue");
    }
}
