//! Session module - several independent games driven side by side
//!
//! Each player owns a separate [`GameState`] with its own board and piece
//! generator. Actions are routed by [`PlayerId`] to exactly one game; nothing
//! is shared between games.

use crate::game_state::GameState;
use crate::types::{GameAction, PlayerId};

/// Seed stride between players so their piece sequences differ
const PLAYER_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct Session {
    games: Vec<GameState>,
}

impl Session {
    /// Create `players` games (at least one), none of them running yet
    pub fn new(players: u8, seed: u64) -> Self {
        let count = players.max(1) as u64;
        let games = (0..count)
            .map(|i| GameState::new(seed.wrapping_add(i.wrapping_mul(PLAYER_SEED_STRIDE))))
            .collect();
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.games.len() as u8).map(PlayerId)
    }

    pub fn game(&self, player: PlayerId) -> Option<&GameState> {
        self.games.get(player.index())
    }

    pub fn games(&self) -> &[GameState] {
        &self.games
    }

    /// Apply an action to one player's game; unknown players are ignored
    pub fn dispatch(&mut self, player: PlayerId, action: GameAction) -> bool {
        match self.games.get_mut(player.index()) {
            Some(game) => game.apply_action(action),
            None => false,
        }
    }

    /// Advance every game's gravity to `now_ms`
    pub fn update(&mut self, now_ms: u64) {
        for game in &mut self.games {
            game.update(now_ms);
        }
    }

    /// Start every game over (driver request, never routed from a key)
    pub fn reset_all(&mut self) {
        for game in &mut self.games {
            game.reset();
        }
    }

    /// Pause every running game that is not paused yet
    pub fn pause_all(&mut self) {
        for game in &mut self.games {
            if game.running() && !game.paused() {
                game.toggle_pause();
            }
        }
    }

    pub fn any_running(&self) -> bool {
        self.games.iter().any(|game| game.running())
    }
}
