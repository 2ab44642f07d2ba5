use core::future::Future;
use core::result::Result;

use crate::protocol::{
    CheckRequest, CheckResponse, DailyInfo, GameResponse, GameStatusResponse, NewGameResponse,
};
use crate::{
    Clock, GameError, GameSession, GuessResolution, LoadError, PersistenceManager, SnapshotStore,
    TransportError,
};

/// The puzzle server as seen from the page.
pub trait PuzzleApi {
    fn fetch_game(&self) -> impl Future<Output = Result<GameResponse, TransportError>>;

    fn check_selection(
        &self,
        request: CheckRequest,
    ) -> impl Future<Output = Result<CheckResponse, TransportError>>;

    fn daily_info(&self) -> impl Future<Output = Result<DailyInfo, TransportError>>;

    fn new_game(&self) -> impl Future<Output = Result<NewGameResponse, TransportError>>;

    fn game_status(&self) -> impl Future<Output = Result<GameStatusResponse, TransportError>>;
}

/// How a session came to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Opened {
    Restored(GameSession),
    Fresh(GameSession),
}

impl Opened {
    pub fn into_session(self) -> GameSession {
        match self {
            Self::Restored(session) | Self::Fresh(session) => session,
        }
    }

    pub const fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Resumes the stored session, or fetches today's puzzle when there is none worth resuming.
pub async fn open_session<A, S, C>(
    api: &A,
    persistence: &PersistenceManager<S, C>,
) -> Result<Opened, LoadError>
where
    A: PuzzleApi,
    S: SnapshotStore,
    C: Clock,
{
    if let Some(session) = persistence.restore() {
        return Ok(Opened::Restored(session));
    }

    let game = api.fetch_game().await?;
    let session = GameSession::new(game.words, game.game_date)?;
    if let Err(err) = persistence.save(&session) {
        log::warn!("could not store fresh session: {}", err);
    }
    Ok(Opened::Fresh(session))
}

/// Asks the server for a different puzzle. The stored snapshot is dropped first so a
/// failed save cannot bring the old board back on reload.
pub async fn start_new_game<A, S, C>(
    api: &A,
    persistence: &PersistenceManager<S, C>,
) -> Result<GameSession, LoadError>
where
    A: PuzzleApi,
    S: SnapshotStore,
    C: Clock,
{
    let game = api.new_game().await?;
    let session = GameSession::new(game.words, None)?;
    persistence.clear();
    if let Err(err) = persistence.save(&session) {
        log::warn!("could not store new session: {}", err);
    }
    Ok(session)
}

/// Runs one full guess against the server: lock the selection, ask, settle, store.
pub async fn play_guess<A, S, C>(
    session: &mut GameSession,
    api: &A,
    persistence: &PersistenceManager<S, C>,
) -> Result<GuessResolution, GameError>
where
    A: PuzzleApi,
    S: SnapshotStore,
    C: Clock,
{
    let request = session.begin_guess()?;
    let reply = api.check_selection(request.to_wire()).await;
    let resolution = session.settle_guess(&request, reply)?;

    if matches!(resolution, GuessResolution::Checked(_)) {
        if let Err(err) = persistence.save(session) {
            log::warn!("could not store session: {}", err);
        }
    }
    Ok(resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::{Message, SessionStatus, Snapshot, Verdict};
    use futures::executor::block_on;

    fn persistence() -> PersistenceManager<MemoryStore, FixedClock> {
        PersistenceManager::new(MemoryStore::default(), FixedClock::at_millis(NOW_MS))
    }

    #[test]
    fn fresh_puzzle_when_nothing_is_stored() {
        let api = FakeApi::new();
        let persistence = persistence();

        let opened = block_on(open_session(&api, &persistence)).unwrap();

        assert!(!opened.is_restored());
        assert_eq!(api.calls("game"), 1);
        assert!(persistence.store().read().is_some());
        assert_eq!(opened.into_session().game_date(), Some(TODAY));
    }

    #[test]
    fn stored_session_skips_the_server() {
        let api = FakeApi::new();
        let persistence = persistence();
        persistence
            .store()
            .write(&serde_json::to_string(&fresh_snapshot()).unwrap())
            .unwrap();

        let opened = block_on(open_session(&api, &persistence)).unwrap();

        assert!(opened.is_restored());
        assert_eq!(api.calls("game"), 0);
    }

    #[test]
    fn expired_snapshot_triggers_fetch() {
        let api = FakeApi::new();
        let persistence = persistence();
        let stale = Snapshot {
            timestamp: NOW_MS - 25 * 60 * 60 * 1000,
            ..fresh_snapshot()
        };
        persistence
            .store()
            .write(&serde_json::to_string(&stale).unwrap())
            .unwrap();

        let opened = block_on(open_session(&api, &persistence)).unwrap();

        assert!(!opened.is_restored());
        assert_eq!(api.calls("game"), 1);
    }

    #[test]
    fn offline_load_reports_transport_error() {
        let api = FakeApi::new();
        api.go_offline();

        let result = block_on(open_session(&api, &persistence()));

        assert!(matches!(result, Err(LoadError::Transport(_))));
    }

    #[test]
    fn full_game_is_won_and_stored() {
        let api = FakeApi::new();
        let persistence = persistence();
        let mut session = block_on(open_session(&api, &persistence))
            .unwrap()
            .into_session();

        for (_, words) in CATEGORIES {
            for word in words {
                session.toggle(word).unwrap();
            }
            let resolution = block_on(play_guess(&mut session, &api, &persistence)).unwrap();
            assert!(matches!(
                resolution,
                GuessResolution::Checked(outcome) if matches!(outcome.verdict, Verdict::Solved { .. })
            ));
        }

        assert_eq!(session.status(), SessionStatus::Won);
        let stored: Snapshot =
            serde_json::from_str(&persistence.store().read().unwrap()).unwrap();
        assert_eq!(stored.found_categories.len(), 4);
    }

    #[test]
    fn dropped_connection_keeps_selection_for_retry() {
        let api = FakeApi::new();
        let persistence = persistence();
        let mut session = block_on(open_session(&api, &persistence))
            .unwrap()
            .into_session();
        for word in FRUITS {
            session.toggle(word).unwrap();
        }

        api.go_offline();
        let resolution = block_on(play_guess(&mut session, &api, &persistence)).unwrap();

        assert_eq!(
            resolution,
            GuessResolution::Failed(Message::error(crate::CONNECTION_ERROR_MESSAGE))
        );
        assert_eq!(session.selection().len(), 4);
        assert_eq!(session.mistakes(), 0);
        assert!(session.can_submit());
    }

    #[test]
    fn new_game_replaces_stored_snapshot() {
        let api = FakeApi::new();
        let persistence = persistence();
        let mut session = block_on(open_session(&api, &persistence))
            .unwrap()
            .into_session();
        for word in FRUITS {
            session.toggle(word).unwrap();
        }
        block_on(play_guess(&mut session, &api, &persistence)).unwrap();

        let session = block_on(start_new_game(&api, &persistence)).unwrap();

        assert!(session.found().is_empty());
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.game_date(), None);
        let stored: Snapshot =
            serde_json::from_str(&persistence.store().read().unwrap()).unwrap();
        assert!(stored.found_categories.is_empty());
    }
}
