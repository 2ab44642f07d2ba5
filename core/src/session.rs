use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::protocol::{CheckRequest, CheckResponse, GameStatusResponse};
use crate::*;

pub const DEFAULT_MISS_MESSAGE: &str = "Wrong! Try again.";
pub const UNNAMED_CATEGORY: &str = "Unnamed category";
pub const WIN_MESSAGE: &str = "Congratulations! You found all the categories!";
pub const LOSS_MESSAGE: &str = "Game over! Too many mistakes.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

static NEXT_TICKET: AtomicU32 = AtomicU32::new(0);

/// Identifies the one guess that may be in flight. Tickets are drawn from a
/// process-wide counter so a reply meant for a replaced session never matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuessTicket(u32);

/// A guess ready to be sent to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRequest {
    ticket: GuessTicket,
    words: [String; GROUP_SIZE],
}

impl GuessRequest {
    pub const fn ticket(&self) -> GuessTicket {
        self.ticket
    }

    pub fn words(&self) -> &[String; GROUP_SIZE] {
        &self.words
    }

    pub fn to_wire(&self) -> CheckRequest {
        CheckRequest {
            selected_words: self.words.to_vec(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Solved { category: usize },
    Missed { mistakes: u8 },
}

/// What a finished round-trip did, plus the messages to show for it.
///
/// `follow_up` is the end-of-game message, meant to appear after
/// [`FOLLOW_UP_DELAY`] so `feedback` is seen first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub verdict: Verdict,
    pub feedback: Message,
    pub follow_up: Option<Message>,
}

/// Result of settling a guess round-trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessResolution {
    Checked(GuessOutcome),
    Failed(Message),
}

/// Everything one player knows about the current puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    board: PuzzleBoard,
    selection: SelectionSet,
    found: Vec<Category>,
    mistakes: u8,
    status: SessionStatus,
    game_date: Option<String>,
    layout: GridLayout,
    pending: Option<GuessTicket>,
}

impl GameSession {
    pub fn new(words: Vec<String>, game_date: Option<String>) -> Result<Self> {
        let board = PuzzleBoard::new(words)?;
        let layout = GridLayout::new(board.words());
        Ok(Self {
            board,
            selection: SelectionSet::new(),
            found: Vec::new(),
            mistakes: 0,
            status: SessionStatus::default(),
            game_date,
            layout,
            pending: None,
        })
    }

    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn found(&self) -> &[Category] {
        &self.found
    }

    pub fn mistakes(&self) -> u8 {
        self.mistakes
    }

    pub fn mistakes_left(&self) -> u8 {
        MISTAKE_BUDGET.saturating_sub(self.mistakes)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn game_date(&self) -> Option<&str> {
        self.game_date.as_deref()
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_selected(&self, word: &str) -> bool {
        self.selection.contains(word)
    }

    /// Whether clicking `word` can currently change anything.
    pub fn is_interactive(&self, word: &str) -> bool {
        self.status.is_playing() && self.board.validate_free(word).is_ok()
    }

    pub fn can_submit(&self) -> bool {
        self.status.is_playing() && self.pending.is_none() && self.selection.is_full()
    }

    pub fn toggle(&mut self, word: &str) -> Result<SelectOutcome> {
        self.check_playing()?;
        if self.pending.is_some() {
            return Err(GameError::GuessPending);
        }
        self.board.validate_free(word)?;

        Ok(self.selection.toggle(word))
    }

    /// Clears the selection. Allowed in every state.
    pub fn deselect_all(&mut self) -> SelectOutcome {
        self.selection.clear()
    }

    /// Shuffles the remaining words and drops the selection.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.layout.shuffle(rng);
        self.selection.clear();
    }

    /// Locks in the current selection as the single outstanding guess.
    pub fn begin_guess(&mut self) -> Result<GuessRequest> {
        self.check_playing()?;
        if self.pending.is_some() {
            return Err(GameError::GuessPending);
        }
        let words = self
            .selection
            .as_group()
            .ok_or(GameError::IncompleteSelection)?;

        let ticket = GuessTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.pending = Some(ticket);
        log::debug!("guess {:?} submitted: {:?}", ticket, words);

        Ok(GuessRequest { ticket, words })
    }

    /// Applies the server's verdict for the pending guess.
    pub fn resolve_guess(
        &mut self,
        request: &GuessRequest,
        response: CheckResponse,
    ) -> Result<GuessOutcome> {
        self.take_pending(request.ticket)?;
        self.check_playing()?;

        let outcome = if response.valid {
            self.accept_guess(request, response)?
        } else {
            self.reject_guess(response)
        };

        self.selection.clear();
        Ok(outcome)
    }

    /// Releases the pending guess after a transport failure. Nothing else changes,
    /// so the player can simply submit again.
    pub fn abandon_guess(
        &mut self,
        request: &GuessRequest,
        error: &TransportError,
    ) -> Result<Message> {
        self.take_pending(request.ticket)?;
        log::warn!("guess {:?} failed: {}", request.ticket, error);
        Ok(Message::error(CONNECTION_ERROR_MESSAGE))
    }

    /// Settles the pending guess with whatever the round-trip produced.
    pub fn settle_guess(
        &mut self,
        request: &GuessRequest,
        reply: core::result::Result<CheckResponse, TransportError>,
    ) -> Result<GuessResolution> {
        match reply {
            Ok(response) => self
                .resolve_guess(request, response)
                .map(GuessResolution::Checked),
            Err(error) => self
                .abandon_guess(request, &error)
                .map(GuessResolution::Failed),
        }
    }

    /// Takes over categories the server recorded but this session has not seen,
    /// provided their words are still free here. Returns how many were applied.
    pub fn absorb_server_progress(&mut self, status: &GameStatusResponse) -> usize {
        if let Some(error) = &status.error {
            log::debug!("server has no progress to offer: {}", error);
            return 0;
        }
        if !self.status.is_playing() || self.pending.is_some() {
            return 0;
        }

        let mut applied = 0;
        for category in &status.found_categories {
            if self.is_known_category(&category.words) {
                continue;
            }
            let Ok(words) = <[String; GROUP_SIZE]>::try_from(category.words.clone()) else {
                log::warn!("server category {:?} is not a group of four", category.name);
                continue;
            };
            match self.apply_category(category.name.clone(), words) {
                Ok(_) => applied += 1,
                Err(err) => log::warn!("skipping server category {:?}: {}", category.name, err),
            }
            if !self.status.is_playing() {
                break;
            }
        }
        applied
    }

    /// Records a found category: marks its words used, reflows the grid and
    /// updates the status. Fails without side effects if any word is not free.
    pub(crate) fn apply_category(
        &mut self,
        name: String,
        words: [String; GROUP_SIZE],
    ) -> Result<usize> {
        let distinct: BTreeSet<&str> = words.iter().map(String::as_str).collect();
        if distinct.len() != GROUP_SIZE {
            return Err(GameError::Desync);
        }
        for word in &words {
            self.board.validate_free(word)?;
        }
        for word in &words {
            self.board.mark_used(word)?;
        }
        for word in &words {
            if self.selection.contains(word) {
                self.selection.toggle(word);
            }
        }

        let index = self.found.len();
        self.layout.replace_with_category(index, &words);
        self.found.push(Category::new(name, words, index));
        self.update_status();
        Ok(index)
    }

    pub(crate) fn restore_progress(&mut self, mistakes: u8, selected: &[String]) {
        self.mistakes = mistakes;
        self.update_status();
        if !self.status.is_playing() {
            return;
        }
        for word in selected {
            if self.board.validate_free(word).is_ok() && !self.selection.contains(word) {
                self.selection.toggle(word);
            }
        }
    }

    fn accept_guess(
        &mut self,
        request: &GuessRequest,
        response: CheckResponse,
    ) -> Result<GuessOutcome> {
        let name = response
            .category_name
            .unwrap_or_else(|| UNNAMED_CATEGORY.to_string());
        let feedback = Message::success(format!("Correct! \"{}\"", name));

        let category = match self.apply_category(name, request.words.clone()) {
            Ok(category) => category,
            Err(err) => {
                log::warn!("accepted guess no longer fits the board: {}", err);
                self.selection.clear();
                return Err(GameError::Desync);
            }
        };

        let won = self.status == SessionStatus::Won;
        if response.game_complete.is_some_and(|complete| complete != won) {
            log::warn!(
                "server game_complete={:?} disagrees with {} found categories",
                response.game_complete,
                self.found.len()
            );
        }
        if let Some(remaining) = response.remaining {
            let local = CATEGORY_COUNT.saturating_sub(self.found.len());
            if usize::from(remaining) != local {
                log::warn!("server reports {} categories left, expected {}", remaining, local);
            }
        }

        Ok(GuessOutcome {
            verdict: Verdict::Solved { category },
            feedback,
            follow_up: won.then(|| Message::success(WIN_MESSAGE)),
        })
    }

    fn reject_guess(&mut self, response: CheckResponse) -> GuessOutcome {
        self.mistakes = self.mistakes.saturating_add(1);
        self.update_status();

        let text = response
            .message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| DEFAULT_MISS_MESSAGE.to_string());
        let lost = self.status == SessionStatus::Lost;

        GuessOutcome {
            verdict: Verdict::Missed {
                mistakes: self.mistakes,
            },
            feedback: Message::error(text),
            follow_up: lost.then(|| Message::error(LOSS_MESSAGE)),
        }
    }

    fn is_known_category(&self, words: &[String]) -> bool {
        self.found
            .iter()
            .any(|category| words.iter().all(|word| category.contains(word)))
    }

    fn take_pending(&mut self, ticket: GuessTicket) -> Result<()> {
        if self.pending != Some(ticket) {
            return Err(GameError::StaleGuess);
        }
        self.pending = None;
        Ok(())
    }

    fn update_status(&mut self) {
        if !self.status.is_playing() {
            return;
        }
        if self.found.len() >= CATEGORY_COUNT {
            self.status = SessionStatus::Won;
        } else if self.mistakes >= MISTAKE_BUDGET {
            self.status = SessionStatus::Lost;
        }
        if self.status.is_finished() {
            log::debug!("session finished: {:?}", self.status);
            self.selection.clear();
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_playing() {
            Ok(())
        } else {
            Err(GameError::AlreadyEnded)
        }
    }
}
