//! Fakes for driving sessions without a browser.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::{DateTime, Utc};
use core::cell::{Cell, RefCell};
use core::result::Result;

use crate::protocol::*;
use crate::{Clock, Snapshot, SnapshotStore, StoreError, TransportError};

pub const FRUITS: [&str; 4] = ["Apple", "Banana", "Orange", "Grape"];
pub const ANIMALS: [&str; 4] = ["Cat", "Dog", "Horse", "Cow"];
pub const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];
pub const CITIES: [&str; 4] = ["Moscow", "Paris", "London", "Tokyo"];

pub const CATEGORIES: [(&str, [&str; 4]); 4] = [
    ("Fruits", FRUITS),
    ("Animals", ANIMALS),
    ("Colors", COLORS),
    ("Cities", CITIES),
];

pub const TODAY: &str = "2024-05-01";

/// 2024-05-01T12:00:00Z
pub const NOW_MS: i64 = 1_714_564_800_000;

/// The four categories dealt in a fixed, mixed order.
pub fn fruit_words() -> Vec<String> {
    [
        "Cat", "Apple", "Red", "Paris", "Banana", "Dog", "Blue", "London", "Horse", "Green",
        "Orange", "Tokyo", "Yellow", "Moscow", "Cow", "Grape",
    ]
    .map(String::from)
    .to_vec()
}

pub fn fresh_snapshot() -> Snapshot {
    Snapshot {
        selected_words: Vec::new(),
        mistakes: 0,
        found_categories: Vec::new(),
        words: fruit_words(),
        timestamp: NOW_MS,
        game_date: Some(TODAY.to_string()),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<Option<String>>,
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    fn write(&self, data: &str) -> Result<(), StoreError> {
        *self.data.borrow_mut() = Some(data.to_string());
        Ok(())
    }

    fn remove(&self) {
        self.data.borrow_mut().take();
    }
}

#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at_millis(millis: i64) -> Self {
        Self {
            now: Cell::new(DateTime::<Utc>::from_timestamp_millis(millis).unwrap()),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// In-memory stand-in for the puzzle server, checking guesses by set equality.
#[derive(Debug)]
pub struct FakeApi {
    found: RefCell<Vec<FoundCategory>>,
    offline: Cell<bool>,
    calls: RefCell<BTreeMap<&'static str, usize>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            found: RefCell::new(Vec::new()),
            offline: Cell::new(false),
            calls: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn go_offline(&self) {
        self.offline.set(true);
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.borrow().get(endpoint).copied().unwrap_or(0)
    }

    fn enter(&self, endpoint: &'static str) -> Result<(), TransportError> {
        *self.calls.borrow_mut().entry(endpoint).or_default() += 1;
        if self.offline.get() {
            Err(TransportError::Request("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl crate::PuzzleApi for FakeApi {
    async fn fetch_game(&self) -> Result<GameResponse, TransportError> {
        self.enter("game")?;
        self.found.borrow_mut().clear();
        Ok(GameResponse {
            words: fruit_words(),
            game_date: Some(TODAY.to_string()),
        })
    }

    async fn check_selection(&self, request: CheckRequest) -> Result<CheckResponse, TransportError> {
        self.enter("check_selection")?;
        let mut selected = request.selected_words.clone();
        selected.sort();

        let hit = CATEGORIES.iter().find(|(_, words)| {
            let mut words = words.to_vec();
            words.sort();
            words == selected
        });

        Ok(match hit {
            Some((name, _)) => {
                let mut found = self.found.borrow_mut();
                found.push(FoundCategory {
                    name: name.to_string(),
                    words: request.selected_words,
                });
                let remaining = (CATEGORIES.len() - found.len()) as u8;
                CheckResponse {
                    remaining: Some(remaining),
                    game_complete: Some(remaining == 0),
                    ..CheckResponse::correct(*name)
                }
            }
            None => CheckResponse::wrong(Some("These words do not form a category".to_string())),
        })
    }

    async fn daily_info(&self) -> Result<DailyInfo, TransportError> {
        self.enter("daily_info")?;
        Ok(DailyInfo {
            today: TODAY.to_string(),
            is_new_day: false,
        })
    }

    async fn new_game(&self) -> Result<NewGameResponse, TransportError> {
        self.enter("new_game")?;
        self.found.borrow_mut().clear();
        let mut words = fruit_words();
        words.reverse();
        Ok(NewGameResponse { words })
    }

    async fn game_status(&self) -> Result<GameStatusResponse, TransportError> {
        self.enter("game_status")?;
        let found = self.found.borrow().clone();
        Ok(GameStatusResponse {
            remaining: Some((CATEGORIES.len() - found.len()) as u8),
            total_categories: Some(CATEGORIES.len() as u8),
            found_categories: found,
            error: None,
        })
    }
}
