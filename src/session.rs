//! A ledger bound to a snapshot store.

use crate::error::SessionError;
use crate::game::{Game, RoundOutcome};
use crate::notice::Notifier;
use crate::options::GameOptions;
use crate::score::Score;
use crate::snapshot::SnapshotStore;

/// A [`Game`] that is saved after every successful change.
///
/// Opening a session resumes whatever the store holds. Rejected operations
/// leave both the ledger and the store untouched, and a change that cannot be
/// saved is rolled back so the ledger keeps matching the store.
#[derive(Debug)]
pub struct Session<S> {
    game: Game,
    store: S,
}

impl<S: SnapshotStore> Session<S> {
    /// Opens a session, resuming the stored game if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds an inconsistent
    /// snapshot.
    pub fn open(mut store: S, options: GameOptions) -> Result<Self, SessionError<S::Error>> {
        let game = match store.load().map_err(SessionError::Store)? {
            Some(snapshot) => Game::from_snapshot(snapshot, options)?,
            None => Game::new(options),
        };
        Ok(Self { game, store })
    }

    /// Returns the ledger.
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Splits the session into its ledger and store.
    pub fn into_parts(self) -> (Game, S) {
        (self.game, self.store)
    }

    /// Starts a game and saves it.
    ///
    /// # Errors
    ///
    /// See [`Game::start_game`]; also fails if the snapshot cannot be saved.
    pub fn start_game<I, T>(&mut self, names: I) -> Result<(), SessionError<S::Error>>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.commit(|game| game.start_game(names).map_err(SessionError::from))
    }

    /// Records a score and saves the ledger.
    ///
    /// # Errors
    ///
    /// See [`Game::set_score`]; also fails if the snapshot cannot be saved.
    pub fn set_score(
        &mut self,
        round: usize,
        player: usize,
        raw: &str,
    ) -> Result<Score, SessionError<S::Error>> {
        self.commit(|game| game.set_score(round, player, raw).map_err(SessionError::from))
    }

    /// Closes the open round and saves the ledger.
    ///
    /// # Errors
    ///
    /// See [`Game::add_round`]; also fails if the snapshot cannot be saved.
    pub fn add_round(&mut self) -> Result<RoundOutcome, SessionError<S::Error>> {
        self.commit(|game| game.add_round().map_err(SessionError::from))
    }

    /// Discards the game and clears the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn new_game(&mut self) -> Result<(), SessionError<S::Error>> {
        self.game.new_game();
        self.store.clear().map_err(SessionError::Store)
    }

    /// Delivers the ledger's pending notices.
    pub fn dispatch<N: Notifier + ?Sized>(&mut self, notifier: &mut N) {
        self.game.dispatch(notifier);
    }

    /// Applies a change and saves it, restoring the previous ledger if the
    /// save fails.
    fn commit<T, F>(&mut self, change: F) -> Result<T, SessionError<S::Error>>
    where
        F: FnOnce(&mut Game) -> Result<T, SessionError<S::Error>>,
    {
        let previous = self.game.clone();
        let value = change(&mut self.game)?;
        if let Err(err) = self.store.save(&self.game.snapshot()) {
            log::warn!("saving the ledger failed, rolling back");
            self.game = previous;
            return Err(SessionError::Store(err));
        }
        Ok(value)
    }
}
