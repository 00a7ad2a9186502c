//! Tests for the 2048 engine's move, win and game-over behavior.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use strictly_2048::{
    BEST_SCORE_KEY, Direction, GameEngine, Grid, MemoryStore, RandomSource, Rules, ScoreStore,
    StoreError,
};

/// Random source that replays fixed answers and counts how often it is asked.
#[derive(Clone, Default)]
struct ScriptedSource {
    indices: Rc<RefCell<VecDeque<usize>>>,
    rolls: Rc<RefCell<VecDeque<f64>>>,
    calls: Rc<RefCell<usize>>,
}

impl ScriptedSource {
    fn new(indices: &[usize], rolls: &[f64]) -> Self {
        Self {
            indices: Rc::new(RefCell::new(indices.iter().copied().collect())),
            rolls: Rc::new(RefCell::new(rolls.iter().copied().collect())),
            calls: Rc::new(RefCell::new(0)),
        }
    }

    fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        *self.calls.borrow_mut() += 1;
        let index = self.indices.borrow_mut().pop_front().unwrap_or(0);
        index.min(len - 1)
    }

    fn roll_unit(&mut self) -> f64 {
        self.rolls.borrow_mut().pop_front().unwrap_or(0.0)
    }
}

/// Store shared with the test so writes can be inspected.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl ScoreStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<u64>, StoreError> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.0.borrow_mut().set(key, value)
    }
}

/// Store whose reads and writes always fail.
struct BrokenStore;

impl ScoreStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<u64>, StoreError> {
        Err(StoreError::new("storage unavailable"))
    }

    fn set(&mut self, _key: &str, _value: u64) -> Result<(), StoreError> {
        Err(StoreError::new("storage unavailable"))
    }
}

fn grid(rows: [[u32; 4]; 4]) -> Grid {
    Grid::from_rows(&rows).expect("valid grid")
}

/// One move away from a locked board: sliding right frees only (0, 0).
fn nearly_locked() -> Grid {
    grid([
        [4, 8, 16, 0],
        [8, 16, 32, 64],
        [2, 4, 8, 16],
        [8, 16, 32, 64],
    ])
}

#[test]
fn test_gap_merges_on_left_move() {
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[2, 0, 2, 4], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );

    assert!(engine.move_tiles(Direction::Left));
    let rows = engine.grid().to_rows();
    assert_eq!(rows[0], vec![4, 4, 0, 0]);
    assert_eq!(rows[3][3], 2);
    assert_eq!(engine.score(), 4);
}

#[test]
fn test_four_fours_move_right() {
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[4, 4, 4, 4], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );

    assert!(engine.move_tiles(Direction::Right));
    assert_eq!(engine.grid().to_rows()[0], vec![0, 0, 8, 8]);
    assert_eq!(engine.score(), 16);
}

#[test]
fn test_tile_merges_once_per_move() {
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );

    assert!(engine.move_tiles(Direction::Left));
    assert_eq!(engine.grid().to_rows()[0], vec![4, 4, 0, 0]);
    assert_eq!(engine.score(), 8);
}

#[test]
fn test_blocked_move_changes_nothing() {
    let source = ScriptedSource::new(&[], &[]);
    let mut engine = GameEngine::from_grid(
        grid([[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source.clone(),
        MemoryStore::new(),
    );
    let before = engine.snapshot();

    assert!(!engine.move_tiles(Direction::Left));
    assert!(!engine.move_tiles(Direction::Up));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(source.calls(), 0, "no tile spawned on a blocked move");
}

#[test]
fn test_locking_move_sets_game_over() {
    let source = ScriptedSource::new(&[0], &[0.0]);
    let mut engine = GameEngine::from_grid(nearly_locked(), source, MemoryStore::new());
    assert!(!engine.is_game_over());

    assert!(engine.move_tiles(Direction::Right));
    assert_eq!(engine.grid().to_rows()[0], vec![2, 4, 8, 16]);
    assert!(engine.is_game_over());
}

#[test]
fn test_full_board_with_pair_keeps_playing() {
    // A 4 lands next to the 4, leaving a merge.
    let source = ScriptedSource::new(&[0], &[0.95]);
    let mut engine = GameEngine::from_grid(nearly_locked(), source, MemoryStore::new());

    assert!(engine.move_tiles(Direction::Right));
    assert_eq!(engine.grid().to_rows()[0], vec![4, 4, 8, 16]);
    assert!(engine.grid().is_full());
    assert!(!engine.is_game_over());
}

#[test]
fn test_game_over_blocks_every_move() {
    let locked = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    let source = ScriptedSource::new(&[], &[]);
    let mut engine = GameEngine::from_grid(locked.clone(), source.clone(), MemoryStore::new());

    assert!(engine.is_game_over());
    for direction in Direction::ALL {
        assert!(!engine.move_tiles(direction));
    }
    assert_eq!(engine.grid(), locked);
    assert_eq!(source.calls(), 0);
}

#[test]
fn test_win_flag_does_not_stop_play() {
    let source = ScriptedSource::new(&[13, 13], &[0.0, 0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );
    assert!(!engine.has_won());

    assert!(engine.move_tiles(Direction::Left));
    assert!(engine.has_won());
    assert_eq!(engine.score(), 2048);

    assert!(engine.move_tiles(Direction::Right));
    assert!(engine.has_won());
    assert!(!engine.is_game_over());
    assert_eq!(engine.grid().to_rows()[0][3], 2048);
}

#[test]
fn test_reset_clears_flags() {
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );
    engine.move_tiles(Direction::Left);
    assert!(engine.has_won());

    engine.reset();
    assert!(!engine.has_won());
    assert!(!engine.is_game_over());
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.best_score(), 2048);
    assert_eq!(engine.grid().tile_count(), 2);
}

#[test]
fn test_best_score_written_through() {
    let store = SharedStore::default();
    store.0.borrow_mut().set(BEST_SCORE_KEY, 2).unwrap();
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[4, 4, 4, 4], [0; 4], [0; 4], [0; 4]]),
        source,
        store.clone(),
    );
    assert_eq!(engine.best_score(), 2);

    engine.move_tiles(Direction::Left);
    assert_eq!(engine.best_score(), 16);
    assert_eq!(store.0.borrow().get(BEST_SCORE_KEY).unwrap(), Some(16));
}

#[test]
fn test_lower_score_leaves_best_alone() {
    let store = SharedStore::default();
    store.0.borrow_mut().set(BEST_SCORE_KEY, 1000).unwrap();
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source,
        store.clone(),
    );

    engine.move_tiles(Direction::Left);
    assert_eq!(engine.score(), 8);
    assert_eq!(engine.best_score(), 1000);
    assert_eq!(store.0.borrow().get(BEST_SCORE_KEY).unwrap(), Some(1000));
}

#[test]
fn test_store_failure_does_not_abort_move() {
    let source = ScriptedSource::new(&[13], &[0.0]);
    let mut engine = GameEngine::from_grid(
        grid([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source,
        BrokenStore,
    );
    assert_eq!(engine.best_score(), 0);
    assert!(engine.take_store_warning().is_some(), "read failure reported");

    assert!(engine.move_tiles(Direction::Left));
    assert_eq!(engine.best_score(), 8);
    let warning = engine.take_store_warning().expect("write failure reported");
    assert!(warning.message.contains("unavailable"));
    assert!(engine.take_store_warning().is_none());
}

#[test]
fn test_unknown_direction_rejected_at_parse() {
    assert!("diagonal".parse::<Direction>().is_err());
    assert_eq!("Down".parse::<Direction>().unwrap(), Direction::Down);
}

#[test]
fn test_resumed_big_tile_counts_as_won() {
    let source = ScriptedSource::new(&[], &[]);
    let engine = GameEngine::from_grid(
        grid([[4096, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
        source,
        MemoryStore::new(),
    );
    assert!(engine.has_won());
    assert!(!engine.is_game_over());
}

#[test]
fn test_snapshot_serializes_for_front_ends() {
    let source = ScriptedSource::new(&[], &[]);
    let engine = GameEngine::from_grid(
        grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]),
        source,
        MemoryStore::with_best_score(12),
    );

    let json = serde_json::to_value(engine.snapshot()).expect("snapshot serializes");
    assert_eq!(json["score"], 0);
    assert_eq!(json["best_score"], 12);
    assert_eq!(json["game_over"], false);
    assert_eq!(json["grid"]["size"], 4);
    assert_eq!(json["grid"]["cells"][0]["Tile"], 2);
    assert_eq!(json["grid"]["cells"][1], "Empty");

    let direction = serde_json::to_value(Direction::Left).expect("direction serializes");
    assert_eq!(direction, "left");
}

#[test]
fn test_largest_tiles_slide_but_never_merge() {
    let top = 1u32 << 31;
    let source = ScriptedSource::new(&[0], &[0.0]);
    let mut engine = GameEngine::from_grid(
        Grid::from_rows(&[[top, top], [0, 0]]).expect("valid grid"),
        source.clone(),
        MemoryStore::new(),
    );

    assert!(!engine.move_tiles(Direction::Left));
    assert!(!engine.move_tiles(Direction::Right));
    assert_eq!(source.calls(), 0);
    assert_eq!(engine.score(), 0);

    assert!(engine.move_tiles(Direction::Down));
    assert_eq!(engine.grid().to_rows(), vec![vec![2, 0], vec![top, top]]);
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_stuck_largest_tiles_end_the_game() {
    let top = 1u32 << 31;
    let source = ScriptedSource::new(&[0], &[0.0]);
    let mut engine = GameEngine::from_grid(
        Grid::from_rows(&[[0, top], [top, 4]]).expect("valid grid"),
        source,
        MemoryStore::new(),
    );

    assert!(engine.move_tiles(Direction::Left));
    assert_eq!(engine.grid().to_rows(), vec![vec![top, 2], vec![top, 4]]);
    assert!(engine.is_game_over());
}

#[test]
fn test_resumed_game_keeps_custom_rules() {
    let rules = Rules {
        size: 8,
        winning_tile: 64,
        four_probability: 1.0,
    };
    let source = ScriptedSource::new(&[0], &[0.5]);
    let mut engine = GameEngine::from_grid_with_rules(
        grid([[32, 32, 0, 0], [0; 4], [0; 4], [0; 4]]),
        rules,
        source,
        MemoryStore::new(),
    );
    assert_eq!(engine.rules().size, 4);
    assert_eq!(engine.rules().winning_tile, 64);
    assert!(!engine.has_won());

    assert!(engine.move_tiles(Direction::Right));
    assert!(engine.has_won());
    assert_eq!(engine.grid().to_rows()[0], vec![4, 0, 0, 64]);
}

#[test]
fn test_resumed_grid_checks_custom_winning_tile() {
    let rules = Rules {
        winning_tile: 128,
        ..Rules::default()
    };
    let engine = GameEngine::from_grid_with_rules(
        grid([[128, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
        rules,
        ScriptedSource::new(&[], &[]),
        MemoryStore::new(),
    );
    assert!(engine.has_won());
}
