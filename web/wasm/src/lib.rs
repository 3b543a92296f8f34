use rummy_score::{
    DangerTier, Game, GameOptions, GameState, MissingScorePolicy, Notice, RoundOutcome, Score,
    Severity, Snapshot,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmTracker {
    game: Game,
}

#[wasm_bindgen]
impl WasmTracker {
    /// `penalty` of 0 rejects rounds with missing scores; anything else auto-fills.
    #[wasm_bindgen(constructor)]
    pub fn new(penalty: u8) -> Self {
        Self {
            game: Game::new(options(penalty)),
        }
    }

    pub fn start_game(&mut self, names: Vec<String>) -> Result<(), JsValue> {
        self.game.start_game(names).map_err(js_err)
    }

    pub fn set_score(&mut self, round: u32, player: u32, raw: &str) -> Result<String, JsValue> {
        self.game
            .set_score(round as usize, player as usize, raw)
            .map(|score| score.to_string())
            .map_err(js_err)
    }

    pub fn add_round(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.game.add_round().map_err(js_err)?;
        to_js_value(&JsRoundOutcome::from(outcome))
    }

    pub fn new_game(&mut self) {
        self.game.new_game();
    }

    /// Returns the plain snapshot for the page to persist.
    pub fn save(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.snapshot())
    }

    /// Replaces the ledger with a previously saved snapshot.
    pub fn load(&mut self, value: JsValue) -> Result<(), JsValue> {
        if value.is_null() || value.is_undefined() {
            return Ok(());
        }
        let snapshot: Snapshot = serde_wasm_bindgen::from_value(value).map_err(js_err)?;
        self.game = Game::from_snapshot(snapshot, self.game.options).map_err(js_err)?;
        Ok(())
    }

    pub fn take_notices(&mut self) -> Result<JsValue, JsValue> {
        let notices: Vec<JsNotice> = self
            .game
            .take_notices()
            .into_iter()
            .map(JsNotice::from)
            .collect();
        to_js_value(&notices)
    }

    pub fn board(&self) -> Result<JsValue, JsValue> {
        let game = &self.game;
        let highlights = game.highlights();
        let players = game
            .players()
            .iter()
            .enumerate()
            .map(|(index, name)| JsPlayer {
                name: name.clone(),
                cells: game
                    .scores(index)
                    .unwrap_or_default()
                    .iter()
                    .map(|score| cell_to_js(*score))
                    .collect(),
                total: game.total(index).unwrap_or_default(),
                locked_total: game.locked_total(index).unwrap_or_default(),
                wins: game.winner_count(index).unwrap_or_default() as u32,
                tier: tier_to_str(game.tier(index).unwrap_or(DangerTier::Normal)),
                eliminated: game.is_eliminated(index),
                leader: highlights.leaders.contains(&index),
                at_risk: highlights.at_risk.contains(&index),
            })
            .collect();

        let board = JsBoard {
            state: state_to_str(game.state()),
            round: game.round_number() as u32,
            open_round: game.open_round().map(|round| round as u32),
            players,
        };

        to_js_value(&board)
    }
}

#[derive(Serialize)]
struct JsBoard {
    state: &'static str,
    round: u32,
    open_round: Option<u32>,
    players: Vec<JsPlayer>,
}

#[derive(Serialize)]
struct JsPlayer {
    name: String,
    cells: Vec<Option<String>>,
    total: u32,
    locked_total: u32,
    wins: u32,
    tier: &'static str,
    eliminated: bool,
    leader: bool,
    at_risk: bool,
}

#[derive(Serialize)]
struct JsRoundOutcome {
    closed_round: Option<u32>,
    open_round: u32,
    eliminated: Vec<u32>,
    game_over: bool,
}

impl From<RoundOutcome> for JsRoundOutcome {
    fn from(outcome: RoundOutcome) -> Self {
        Self {
            closed_round: outcome.closed_round.map(|round| round as u32),
            open_round: outcome.open_round as u32,
            eliminated: outcome.eliminated.into_iter().map(|index| index as u32).collect(),
            game_over: outcome.game_over,
        }
    }
}

#[derive(Serialize)]
struct JsNotice {
    message: String,
    severity: &'static str,
}

impl From<Notice> for JsNotice {
    fn from(notice: Notice) -> Self {
        Self {
            message: notice.message,
            severity: severity_to_str(notice.severity),
        }
    }
}

fn options(penalty: u8) -> GameOptions {
    let policy = if penalty == 0 {
        MissingScorePolicy::Reject
    } else {
        MissingScorePolicy::Penalty(penalty)
    };
    GameOptions::default().with_missing_scores(policy)
}

fn cell_to_js(score: Score) -> Option<String> {
    match score {
        Score::Empty => None,
        other => Some(other.to_string()),
    }
}

fn state_to_str(state: GameState) -> &'static str {
    match state {
        GameState::Setup => "Setup",
        GameState::InProgress => "InProgress",
        GameState::GameOver => "GameOver",
    }
}

fn tier_to_str(tier: DangerTier) -> &'static str {
    match tier {
        DangerTier::Normal => "normal",
        DangerTier::Warning => "warning",
        DangerTier::Danger => "danger",
        DangerTier::Eliminated => "eliminated",
    }
}

fn severity_to_str(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "success",
        Severity::Warning => "warning",
        Severity::Danger => "danger",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// Empty cells must reach the page as `null`, not `undefined`.
fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
