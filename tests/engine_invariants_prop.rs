//! Property tests for engine invariants over random seeds and input sequences.
//!
//! Invariants covered:
//! - The active piece never overlaps walls, floor or locked cells after an action.
//! - No full row survives a lock.
//! - Score is the sum of the lock events' points; level and drop interval follow lines.
//! - A hard drop ends in the same state as single-row drops repeated until the lock.
//! - Four clockwise rotations in open space give back the starting shape.
use proptest::prelude::*;

use blocktris::core::{drop_interval_ms, GameState};
use blocktris::types::{GameAction, PieceKind, BOARD_HEIGHT};

const GAMEPLAY: [GameAction; 6] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::SoftDrop,
    GameAction::HardDrop,
    GameAction::Rotate,
    GameAction::Pause,
];

fn action_strategy() -> impl Strategy<Value = GameAction> {
    (0..GAMEPLAY.len()).prop_map(|i| GAMEPLAY[i])
}

fn assert_consistent(g: &GameState) {
    if g.running() {
        let active = g.active().expect("running game has an active piece");
        assert!(!active.collides(g.board()));
    }
    for y in 0..BOARD_HEIGHT as usize {
        assert!(!g.board().is_row_full(y), "row {y} left full");
    }
    assert_eq!(g.level(), 1 + g.lines() / 10);
    assert_eq!(g.drop_interval_ms(), drop_interval_ms(g.level()));
    assert!(g.drop_interval_ms() >= 200);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_random_play(
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 0..300),
        ticks in prop::collection::vec(0u32..400, 0..300),
    ) {
        let mut g = GameState::new(seed);
        g.reset();
        let mut points = 0u32;

        for (i, action) in actions.iter().enumerate() {
            g.apply_action(*action);
            if let Some(&dt) = ticks.get(i) {
                g.tick(dt);
            }
            if let Some(event) = g.take_last_event() {
                prop_assert!(event.rows_cleared <= 4);
                points += event.points;
            }
            assert_consistent(&g);
        }

        prop_assert_eq!(g.score(), points);
        prop_assert_eq!(g.score() % 100, 0);
    }

    #[test]
    fn game_over_freezes_state(seed in any::<u64>(), extra in prop::collection::vec(action_strategy(), 1..20)) {
        let mut g = GameState::new(seed);
        g.reset();
        while g.running() {
            g.hard_drop();
        }
        prop_assert!(g.game_over());

        let frozen = g.snapshot();
        for action in extra {
            g.apply_action(action);
            g.tick(1_000);
        }
        prop_assert_eq!(g.snapshot(), frozen);
    }

    #[test]
    fn hard_drop_matches_repeated_single_row_drops(
        seed in any::<u64>(),
        warmup in 0usize..12,
        rotations in 0usize..4,
        dx in -5i8..=5,
    ) {
        let mut g = GameState::new(seed);
        g.reset();
        // Build an uneven stack first.
        for i in 0..warmup {
            g.rotate();
            g.move_by((i as i8 % 7) - 3);
            g.hard_drop();
        }
        prop_assume!(g.running());

        for _ in 0..rotations {
            g.rotate();
        }
        g.move_by(dx);
        g.take_last_event();

        let mut stepped = g.clone();
        let mut rows = 0u32;
        while stepped.drop_one_row() {
            rows += 1;
        }
        let mut dropped = g;
        let distance = dropped.hard_drop();

        prop_assert_eq!(distance, rows);
        prop_assert_eq!(stepped.board(), dropped.board());
        prop_assert_eq!(stepped.score(), dropped.score());
        prop_assert_eq!(stepped.lines(), dropped.lines());
        prop_assert_eq!(stepped.active(), dropped.active());
        prop_assert_eq!(stepped.running(), dropped.running());
        prop_assert_eq!(stepped.take_last_event(), dropped.take_last_event());
    }

    #[test]
    fn four_rotations_restore_shape(kind_idx in 0usize..7) {
        let kind = PieceKind::ALL[kind_idx];
        let mut shape = blocktris::core::base_shape(kind);
        let start = shape;
        for _ in 0..4 {
            shape = shape.rotated_cw();
        }
        prop_assert_eq!(shape, start);
        prop_assert_eq!(shape.minos().len(), 4);
    }
}
