// Simulated games for exercising the engine end to end
//
// Spawns follow the configured odds and draw from a seeded StdRng, so a
// given seed always replays the same game.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::Config;
use crate::types::Direction;

/// A board plus the random source that spawns its tiles
pub struct Game {
    board: Board,
    rng: StdRng,
    large_value: u32,
    small_value: u32,
    large_probability: f64,
    moves: u32,
}

impl Game {
    /// Starts a game with two random tiles
    pub fn new(config: &Config, seed: u64) -> Self {
        let mut game = Game {
            board: Board::empty(config.search.merge_cap),
            rng: StdRng::seed_from_u64(seed),
            small_value: config.spawn.small_value,
            large_value: config.spawn.large_value,
            large_probability: config.spawn.large_probability,
            moves: 0,
        };
        game.spawn_random_tile();
        game.spawn_random_tile();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves that changed the board
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Drops one tile on a uniformly chosen empty cell
    ///
    /// # Returns
    /// `false` if the board had no empty cell
    pub fn spawn_random_tile(&mut self) -> bool {
        let cells = self.board.empty_cells();
        if cells.is_empty() {
            return false;
        }

        let cell = cells[self.rng.random_range(0..cells.len())];
        let value = if self.rng.random_bool(self.large_probability) {
            self.large_value
        } else {
            self.small_value
        };
        self.board.insert_tile(cell, value);
        true
    }

    /// Plays one move; a move that changes the board is followed by a spawn
    ///
    /// # Returns
    /// Whether the move changed the board
    pub fn step(&mut self, direction: Direction) -> bool {
        if !self.board.apply_move(direction) {
            return false;
        }
        self.moves += 1;
        self.spawn_random_tile();
        true
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }
}
