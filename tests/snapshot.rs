//! Snapshot, store and session tests.

use std::cell::Cell;
use std::convert::Infallible;
use std::path::PathBuf;
use std::rc::Rc;

use rummy_score::{
    Game, GameOptions, GameState, Highlights, JsonFileStore, MemoryStore, Score, Session,
    SessionError, Snapshot, SnapshotError, SnapshotStore,
};

fn played_game() -> Game {
    let mut game = Game::new(GameOptions::default());
    game.start_game(["Ada", "Bo", "Cy"]).unwrap();
    game.set_score(0, 0, "R").unwrap();
    game.set_score(0, 1, "40").unwrap();
    game.set_score(0, 2, "12").unwrap();
    game.add_round().unwrap();
    game.set_score(1, 1, "R").unwrap();
    game
}

/// A memory store whose saves can be made to fail.
#[derive(Debug)]
struct FlakyStore {
    inner: MemoryStore,
    fail: Rc<Cell<bool>>,
}

const fn unreachable(never: Infallible) -> &'static str {
    match never {}
}

impl SnapshotStore for FlakyStore {
    type Error = &'static str;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        if self.fail.get() {
            return Err("disk full");
        }
        self.inner.save(snapshot).map_err(unreachable)
    }

    fn load(&mut self) -> Result<Option<Snapshot>, Self::Error> {
        self.inner.load().map_err(unreachable)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.inner.clear().map_err(unreachable)
    }
}

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rummy-score-{}-{name}.json", std::process::id()))
}

#[test]
fn json_keeps_cell_tri_state() {
    let snapshot = played_game().snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "players": ["Ada", "Bo", "Cy"],
            "scores": [["R", null], [40, "R"], [12, null]],
            "currentRound": 3,
            "highlights": { "leaders": [0], "atRisk": [1] },
        })
    );

    let restored: Snapshot = serde_json::from_value(json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn lowercase_winner_mark_is_accepted() {
    let snapshot: Snapshot = serde_json::from_str(
        r#"{"players":["Ada","Bo"],"scores":[["r",null],[5,null]],"currentRound":3}"#,
    )
    .unwrap();
    assert_eq!(snapshot.scores[0][0], Score::Winner);
    assert_eq!(snapshot.highlights, Highlights::default());
}

#[test]
fn restored_game_matches_saved_game() {
    let game = played_game();
    let restored = Game::from_snapshot(game.snapshot(), GameOptions::default()).unwrap();

    assert_eq!(restored.snapshot(), game.snapshot());
    assert_eq!(restored.state(), GameState::InProgress);
    assert_eq!(restored.round_number(), 2);
    assert_eq!(restored.total(1), Some(40));
    assert_eq!(restored.highlights(), game.highlights());
}

#[test]
fn blank_snapshot_restores_setup() {
    let game = Game::from_snapshot(Snapshot::default(), GameOptions::default()).unwrap();
    assert_eq!(game.state(), GameState::Setup);
}

#[test]
fn inconsistent_snapshots_are_rejected() {
    let base = played_game().snapshot();
    let restore = |snapshot: Snapshot| {
        Game::from_snapshot(snapshot, GameOptions::default()).unwrap_err()
    };

    let mut snapshot = base.clone();
    snapshot.scores.pop();
    assert_eq!(restore(snapshot), SnapshotError::PlayerMismatch);

    let mut snapshot = base.clone();
    snapshot.scores[2].push(Score::Empty);
    assert_eq!(restore(snapshot), SnapshotError::RaggedRounds);

    let mut snapshot = base.clone();
    snapshot.current_round = 7;
    assert_eq!(restore(snapshot), SnapshotError::RoundMismatch);

    let mut snapshot = base.clone();
    snapshot.players[1] = " ".to_string();
    assert_eq!(restore(snapshot), SnapshotError::EmptyName);

    let mut snapshot = base.clone();
    snapshot.scores[1][0] = Score::Points(200);
    assert_eq!(restore(snapshot), SnapshotError::InvalidScore);

    let mut snapshot = base;
    snapshot.highlights.at_risk.insert(9);
    assert_eq!(restore(snapshot), SnapshotError::UnknownHighlight);
}

#[test]
fn restored_game_over_state_is_derived() {
    let mut game = Game::new(GameOptions::default());
    game.start_game(["Ada", "Bo"]).unwrap();
    for _ in 0..4 {
        let round = game.open_round().unwrap();
        game.set_score(round, 0, "70").unwrap();
        game.set_score(round, 1, "R").unwrap();
        game.add_round().unwrap();
    }
    assert_eq!(game.state(), GameState::GameOver);

    let restored = Game::from_snapshot(game.snapshot(), GameOptions::default()).unwrap();
    assert_eq!(restored.state(), GameState::GameOver);
    assert!(restored.is_eliminated(0));
}

#[test]
fn memory_store_hides_blank_snapshots() {
    let mut store = MemoryStore::new();
    assert_eq!(store.load().unwrap(), None);

    store.save(&Snapshot::default()).unwrap();
    assert!(store.get().is_some());
    assert_eq!(store.load().unwrap(), None);

    let snapshot = played_game().snapshot();
    store.save(&snapshot).unwrap();
    assert_eq!(store.load().unwrap(), Some(snapshot));

    store.clear().unwrap();
    assert!(store.get().is_none());
}

#[test]
fn json_file_store_round_trip() {
    let path = temp_file("round-trip");
    let mut store = JsonFileStore::new(&path);
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());

    let snapshot = played_game().snapshot();
    store.save(&snapshot).unwrap();
    assert!(path.exists());
    assert_eq!(store.load().unwrap(), Some(snapshot));

    store.clear().unwrap();
    assert!(!path.exists());
    store.clear().unwrap();
}

#[test]
fn json_file_store_reports_malformed_files() {
    let path = temp_file("malformed");
    std::fs::write(&path, "{ not json").unwrap();

    let mut store = JsonFileStore::new(&path);
    assert!(matches!(
        store.load().unwrap_err(),
        rummy_score::StoreError::Json(_)
    ));
    store.clear().unwrap();
}

#[test]
fn session_saves_and_resumes() {
    let mut session = Session::open(MemoryStore::new(), GameOptions::default()).unwrap();
    session.start_game(["Ada", "Bo"]).unwrap();
    session.set_score(0, 0, "R").unwrap();
    session.set_score(0, 1, "33").unwrap();
    session.add_round().unwrap();

    // Rejected input leaves the stored snapshot alone.
    let saved = session.store().get().cloned();
    assert!(matches!(
        session.set_score(1, 1, "99"),
        Err(SessionError::Score(_))
    ));
    assert!(matches!(session.add_round(), Err(SessionError::Round(_))));
    assert_eq!(session.store().get().cloned(), saved);

    let (game, store) = session.into_parts();
    let resumed = Session::open(store, GameOptions::default()).unwrap();
    assert_eq!(resumed.game().snapshot(), game.snapshot());
    assert_eq!(resumed.game().total(1), Some(33));
}

#[test]
fn session_new_game_clears_store() {
    let mut session = Session::open(MemoryStore::new(), GameOptions::default()).unwrap();
    session.start_game(["Ada", "Bo"]).unwrap();
    assert!(session.store().get().is_some());

    session.new_game().unwrap();
    assert!(session.store().get().is_none());
    assert_eq!(session.game().state(), GameState::Setup);
}

#[test]
fn session_rejects_corrupt_store() {
    let mut store = MemoryStore::new();
    let mut snapshot = played_game().snapshot();
    snapshot.current_round = 1;
    store.save(&snapshot).unwrap();

    assert!(matches!(
        Session::open(store, GameOptions::default()),
        Err(SessionError::Snapshot(SnapshotError::RoundMismatch))
    ));
}

#[test]
fn failed_save_rolls_back_the_change() {
    let fail = Rc::new(Cell::new(false));
    let store = FlakyStore {
        inner: MemoryStore::new(),
        fail: Rc::clone(&fail),
    };
    let mut session = Session::open(store, GameOptions::default()).unwrap();
    session.start_game(["Ada", "Bo"]).unwrap();
    session.set_score(0, 0, "R").unwrap();

    fail.set(true);
    assert!(matches!(
        session.set_score(0, 1, "30"),
        Err(SessionError::Store("disk full"))
    ));
    assert_eq!(session.game().score(0, 1), Some(Score::Empty));
    assert_eq!(session.store().inner.get(), Some(&session.game().snapshot()));

    fail.set(false);
    session.set_score(0, 1, "30").unwrap();
    session.add_round().unwrap();
    assert_eq!(session.game().round_number(), 2);
}
