//! Game state module - manages the complete game state
//!
//! Ties together the board, the piece generator and scoring. It handles gravity
//! timing, movement, rotation, locking, line sweeps and the game lifecycle.
//!
//! The state never reads a clock. Drivers either pass elapsed time to
//! [`GameState::tick`] or absolute timestamps to [`GameState::update`].

use crate::pieces::{base_shape, try_rotate, RotationOutcome, Shape};
use crate::rng::PieceGenerator;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::*;
use crate::Board;

/// A piece: kind, current orientation and the board position of its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at spawn position in its base orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: base_shape(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Whether the piece overlaps a wall, the floor or a locked cell
    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }

    /// Absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// What happened when the last piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub rows_cleared: u32,
    pub points: u32,
    /// The following spawn was blocked and the game ended
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    next: Piece,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Milliseconds accumulated since the last forced descent
    drop_accumulator_ms: u32,
    running: bool,
    paused: bool,
    /// Timestamp of the last `update`; `None` means the next update only resynchronizes.
    last_update_ms: Option<u64>,
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new, not yet running game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::new(seed))
    }

    /// Create a new, not yet running game seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::with_generator(PieceGenerator::from_entropy())
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let next = generator.random_piece();

        Self {
            board: Board::new(),
            active: None,
            next,
            generator,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: BASE_DROP_MS,
            drop_accumulator_ms: 0,
            running: false,
            paused: false,
            last_update_ms: None,
            last_event: None,
        }
    }

    /// Start a new run: empty board, fresh active and next pieces, counters zeroed
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = Some(self.generator.random_piece());
        self.next = self.generator.random_piece();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_accumulator_ms = 0;
        self.running = true;
        self.paused = false;
        self.last_update_ms = None;
        self.last_event = None;
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Ended by a blocked spawn (as opposed to never started)
    pub fn game_over(&self) -> bool {
        !self.running && self.active.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups (puzzles, tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Player actions apply whenever a run is in progress, paused or not
    fn is_live(&self) -> bool {
        self.running && self.active.is_some()
    }

    /// Advance gravity from an absolute timestamp in milliseconds
    ///
    /// The first call after a reset or a resume only records the timestamp,
    /// so time spent before the run or while paused never counts as drop time.
    /// Returns true if a forced descent happened.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.running || self.paused {
            return false;
        }

        let elapsed = match self.last_update_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_update_ms = Some(now_ms);

        self.tick(u32::try_from(elapsed).unwrap_or(u32::MAX))
    }

    /// Advance gravity by `elapsed_ms`
    ///
    /// Once the accumulated time exceeds the drop interval the piece descends
    /// one row and the accumulator restarts from zero, however far it overshot.
    /// Returns true if a forced descent happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_live() || self.paused {
            return false;
        }

        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(elapsed_ms);
        if self.drop_accumulator_ms > self.drop_interval_ms {
            self.drop_one_row();
            self.drop_accumulator_ms = 0;
            return true;
        }

        false
    }

    /// Shift the active piece horizontally; blocked moves leave it in place
    ///
    /// Returns true if the piece moved.
    pub fn move_by(&mut self, dx: i8) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let Some(x) = active.x.checked_add(dx) else {
            return false;
        };
        let moved = Piece { x, ..active };
        if moved.collides(&self.board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Rotate the active piece clockwise, trying the horizontal kick ladder
    ///
    /// Returns true if the rotation was accepted.
    pub fn rotate(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&active.shape, active.x, active.y, |shape, x, y| {
            board.collides(shape, x, y)
        }) {
            RotationOutcome::Accepted { shape, x, .. } => {
                self.active = Some(Piece { shape, x, ..active });
                true
            }
            RotationOutcome::Rejected => false,
        }
    }

    /// Move the active piece down one row, locking it if it cannot descend
    ///
    /// This is both the gravity step and the soft-drop action. The drop
    /// accumulator restarts either way. Returns true if the piece descended,
    /// false if it locked (or the game is not live).
    pub fn drop_one_row(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.drop_accumulator_ms = 0;

        let lowered = Piece {
            y: active.y + 1,
            ..active
        };
        if lowered.collides(&self.board) {
            self.lock_piece();
            return false;
        }

        self.active = Some(lowered);
        true
    }

    /// Drop the active piece to the lowest row it can reach and lock it
    ///
    /// Returns the number of rows the piece fell.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_live() {
            return 0;
        }
        let Some(mut active) = self.active else {
            return 0;
        };

        let mut distance = 0;
        while !board_collides_at(&self.board, &active, active.y + 1) {
            active.y += 1;
            distance += 1;
        }

        self.active = Some(active);
        self.lock_piece();
        self.drop_accumulator_ms = 0;
        distance
    }

    /// Merge, sweep and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        self.merge();
        let score_before = self.score;
        let rows_cleared = self.sweep();
        let spawned = self.spawn_next();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            rows_cleared: rows_cleared as u32,
            points: self.score - score_before,
            game_over: !spawned,
        });
    }

    /// Write the active piece's cells into the board
    pub fn merge(&mut self) {
        if let Some(active) = self.active {
            self.board
                .merge(&active.shape, active.x, active.y, active.kind);
        }
    }

    /// Clear full rows and apply scoring, level and gravity progression
    ///
    /// Returns the number of rows cleared. Clearing nothing leaves score,
    /// level and drop interval untouched.
    pub fn sweep(&mut self) -> usize {
        let cleared = self.board.sweep().len();
        if cleared == 0 {
            return 0;
        }

        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self.score.saturating_add(line_clear_score(cleared));
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = drop_interval_ms(self.level);

        cleared
    }

    /// Promote the queued piece to active (at spawn, base orientation) and queue a new one
    ///
    /// If the promoted piece already collides, the game ends; the piece stays
    /// where it is for display. Returns false on game over.
    pub fn spawn_next(&mut self) -> bool {
        let piece = Piece::new(self.next.kind);
        self.active = Some(piece);
        self.next = self.generator.random_piece();

        if piece.collides(&self.board) {
            self.running = false;
            return false;
        }

        true
    }

    /// Flip the pause flag (ignored unless running)
    ///
    /// Resuming clears the last-update timestamp so the paused interval is not
    /// counted as drop time. Returns true if the flag changed.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.paused = !self.paused;
        if !self.paused {
            self.last_update_ms = None;
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_by(-1),
            GameAction::MoveRight => self.move_by(1),
            GameAction::SoftDrop => {
                // A lock counts as handled, too.
                let live = self.is_live();
                self.drop_one_row();
                live
            }
            GameAction::HardDrop => {
                let live = self.is_live();
                self.hard_drop();
                live
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Fill an existing snapshot without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = NextSnapshot::from(self.next);
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.running = self.running;
        out.paused = self.paused;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn board_collides_at(board: &Board, piece: &Piece, y: i8) -> bool {
    board.collides(&piece.shape, piece.x, y)
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
