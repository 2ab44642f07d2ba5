use alloc::string::{String, ToString};
use alloc::vec::Vec;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::{DailyInfo, FoundCategory};
use crate::*;

pub const NEW_DAY_MESSAGE: &str = "A new daily puzzle is available!";

const SNAPSHOT_TTL_MS: i64 = SNAPSHOT_TTL.as_millis() as i64;

/// Where the snapshot text lives between page loads.
pub trait SnapshotStore {
    const KEY: &'static str = "connections:game:v1";

    fn read(&self) -> Option<String>;
    fn write(&self, data: &str) -> core::result::Result<(), StoreError>;
    fn remove(&self);
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Serialized copy of a session, in the layout the page has always stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub selected_words: Vec<String>,
    #[serde(default)]
    pub mistakes: u8,
    #[serde(default)]
    pub found_categories: Vec<FoundCategory>,
    pub words: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_date: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRejected {
    #[error("wrong word count: {0}")]
    WordCount(usize),
    #[error("timestamp {0} is out of range")]
    Timestamp(i64),
    #[error("snapshot expired")]
    Expired,
    #[error("inconsistent with its own board: {0}")]
    Desync(#[from] GameError),
}

impl Snapshot {
    pub fn capture(session: &GameSession, now: DateTime<Utc>) -> Self {
        Self {
            selected_words: session.selection().words().to_vec(),
            mistakes: session.mistakes(),
            found_categories: session
                .found()
                .iter()
                .map(|category| FoundCategory {
                    name: category.name.clone(),
                    words: category.words.to_vec(),
                })
                .collect(),
            words: session.board().words().map(String::from).collect(),
            timestamp: now.timestamp_millis(),
            game_date: session.game_date().map(String::from),
        }
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    /// Rebuilds the session, replaying found categories in discovery order.
    pub fn into_session(
        self,
        now: DateTime<Utc>,
    ) -> core::result::Result<GameSession, SnapshotRejected> {
        if self.words.len() != BOARD_SIZE {
            return Err(SnapshotRejected::WordCount(self.words.len()));
        }
        let saved_at = self
            .saved_at()
            .ok_or(SnapshotRejected::Timestamp(self.timestamp))?;
        if now.signed_duration_since(saved_at) >= TimeDelta::milliseconds(SNAPSHOT_TTL_MS) {
            return Err(SnapshotRejected::Expired);
        }
        if self.mistakes > MISTAKE_BUDGET {
            return Err(GameError::Desync.into());
        }

        let mut session = GameSession::new(self.words, self.game_date)?;
        for category in self.found_categories {
            let words: [String; GROUP_SIZE] = category
                .words
                .try_into()
                .map_err(|_| GameError::Desync)?;
            session.apply_category(category.name, words)?;
        }
        session.restore_progress(self.mistakes, &self.selected_words);

        Ok(session)
    }
}

/// Saves and restores the session through a [`SnapshotStore`].
#[derive(Clone, Debug)]
pub struct PersistenceManager<S, C> {
    store: S,
    clock: C,
}

impl<S: SnapshotStore, C: Clock> PersistenceManager<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&self, session: &GameSession) -> core::result::Result<(), StoreError> {
        let snapshot = Snapshot::capture(session, self.clock.now());
        let data =
            serde_json::to_string(&snapshot).map_err(|err| StoreError::Encode(err.to_string()))?;
        self.store.write(&data)
    }

    /// Returns the stored session if there is a usable one. Unusable snapshots are
    /// removed so the caller falls back to a fresh puzzle.
    pub fn restore(&self) -> Option<GameSession> {
        let data = self.store.read()?;

        let snapshot: Snapshot = match serde_json::from_str(&data) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("discarding unreadable snapshot: {}", err);
                self.store.remove();
                return None;
            }
        };

        match snapshot.into_session(self.clock.now()) {
            Ok(session) => {
                log::debug!(
                    "restored session with {} categories and {} mistakes",
                    session.found().len(),
                    session.mistakes()
                );
                Some(session)
            }
            Err(reason) => {
                log::info!("discarding snapshot: {}", reason);
                self.store.remove();
                None
            }
        }
    }

    pub fn clear(&self) {
        self.store.remove();
    }

    /// Notice for a player who is still looking at yesterday's partly solved puzzle.
    /// The session itself is kept; it is replaced only by the next fresh fetch.
    pub fn check_daily_rotation(&self, session: &GameSession, info: &DailyInfo) -> Option<Message> {
        let game_date = session.game_date()?;
        if game_date == info.today {
            return None;
        }
        log::info!(
            "puzzle date {} differs from server date {} (new day: {})",
            game_date,
            info.today,
            info.is_new_day
        );
        if session.found().is_empty() {
            return None;
        }
        Some(Message::info(NEW_DAY_MESSAGE))
    }
}
