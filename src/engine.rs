// Expectimax move engine
//
// Each decision searches a fixed number of plies, alternating a maximizing
// player layer with an expectation over tile spawns, and bottoms out in a
// static evaluation. No state is shared between decisions apart from the
// last report kept for diagnostics.

use log::{debug, info};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::Board;
use crate::config::Config;
use crate::error::BoardError;
use crate::types::{Direction, Turn};

/// Direction code returned when no move changes the board
pub const NO_MOVE: i32 = -1;

/// Node counters shared by every branch of one decision
#[derive(Debug, Default)]
pub struct SearchCounters {
    nodes: AtomicU64,
    evaluations: AtomicU64,
}

impl SearchCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }
}

/// Outcome of one root move
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BranchEval {
    pub direction: Direction,
    /// Whether the move changed the board
    pub legal: bool,
    /// Expected score of the resulting position; 0 for illegal moves
    pub score: f64,
}

/// Everything one decision computed
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub best: Option<Direction>,
    pub best_score: Option<f64>,
    /// Root branches in enumeration order
    pub branches: Vec<BranchEval>,
    pub nodes: u64,
    pub evaluations: u64,
    pub elapsed_us: u128,
}

/// Expectimax engine
/// Cheap to clone; clones share the diagnostics slot
#[derive(Clone)]
pub struct Engine {
    config: Arc<Config>,
    last_report: Arc<Mutex<Option<SearchReport>>>,
}

impl Engine {
    /// Creates a new Engine with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the engine's lifetime
    pub fn new(config: Config) -> Self {
        Engine {
            config: Arc::new(config),
            last_report: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns engine metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "search_depth": self.config.search.search_depth,
            "merge_cap": self.config.search.merge_cap,
        })
    }

    /// Report of the most recent decision, if any
    pub fn last_report(&self) -> Option<SearchReport> {
        self.last_report.lock().clone()
    }

    /// Entry point over a flat row-major board
    ///
    /// # Returns
    /// * `Ok(code)` - 0=Up, 1=Right, 2=Down, 3=Left, or [`NO_MOVE`] when the
    ///   position is terminal
    /// * `Err(_)` - the board is not 16 valid tiles
    pub fn get_move(&self, values: &[i64]) -> Result<i32, BoardError> {
        let board = Board::try_from_values(values, self.config.search.merge_cap)?;
        Ok(self
            .choose_move(&board)
            .map(|direction| direction.code())
            .unwrap_or(NO_MOVE))
    }

    /// Picks the direction with the highest expected score, or `None` when
    /// every move is a no-op
    pub fn choose_move(&self, board: &Board) -> Option<Direction> {
        self.analyze(board).best
    }

    /// Runs one full decision and records its report
    ///
    /// Root branches are scored (in parallel if configured) and then compared
    /// in enumeration order with a strict `>`, so the earliest direction wins
    /// ties regardless of completion order.
    pub fn analyze(&self, board: &Board) -> SearchReport {
        let start_time = Instant::now();
        let counters = SearchCounters::new();

        let branches: Vec<BranchEval> = if self.config.search.parallel_root {
            Direction::all()
                .par_iter()
                .map(|&direction| self.evaluate_root_move(board, direction, &counters))
                .collect()
        } else {
            Direction::all()
                .iter()
                .map(|&direction| self.evaluate_root_move(board, direction, &counters))
                .collect()
        };

        let mut best: Option<Direction> = None;
        let mut best_score = f64::NEG_INFINITY;
        for branch in &branches {
            debug!(
                "Root {}: legal={} score={:.3}",
                branch.direction.as_str(),
                branch.legal,
                branch.score
            );
            if branch.legal && branch.score > best_score {
                best_score = branch.score;
                best = Some(branch.direction);
            }
        }

        let report = SearchReport {
            best,
            best_score: best.map(|_| best_score),
            branches,
            nodes: counters.nodes(),
            evaluations: counters.evaluations(),
            elapsed_us: start_time.elapsed().as_micros(),
        };

        match report.best {
            Some(direction) => info!(
                "Chose {} (score: {:.3}, nodes: {}, time: {}us)",
                direction.as_str(),
                best_score,
                report.nodes,
                report.elapsed_us
            ),
            None => info!("No legal move, position is terminal"),
        }

        *self.last_report.lock() = Some(report.clone());
        report
    }

    fn evaluate_root_move(
        &self,
        board: &Board,
        direction: Direction,
        counters: &SearchCounters,
    ) -> BranchEval {
        let mut child = *board;
        if !child.apply_move(direction) {
            return BranchEval {
                direction,
                legal: false,
                score: 0.0,
            };
        }

        let depth = self.config.search.search_depth.saturating_sub(1);
        BranchEval {
            direction,
            legal: true,
            score: self.expectimax(&child, depth, Turn::Chance, counters),
        }
    }

    /// Depth-limited expectimax value of `board`
    ///
    /// Depth 0 and terminal boards return the static evaluation. A chance
    /// node sums probability-weighted child scores over every empty cell and
    /// spawn value, then divides by the number of empty cells.
    pub fn expectimax(&self, board: &Board, depth: u8, turn: Turn, counters: &SearchCounters) -> f64 {
        counters.nodes.fetch_add(1, Ordering::Relaxed);

        if depth == 0 || board.is_terminal() {
            counters.evaluations.fetch_add(1, Ordering::Relaxed);
            return Self::evaluate(board);
        }

        match turn {
            Turn::Player => {
                let mut max_score = f64::NEG_INFINITY;
                for direction in Direction::all() {
                    let mut child = *board;
                    if child.apply_move(direction) {
                        let score = self.expectimax(&child, depth - 1, Turn::Chance, counters);
                        max_score = max_score.max(score);
                    }
                }

                if max_score == f64::NEG_INFINITY {
                    counters.evaluations.fetch_add(1, Ordering::Relaxed);
                    Self::evaluate(board)
                } else {
                    max_score
                }
            }
            Turn::Chance => {
                let cells = board.empty_cells();
                if cells.is_empty() {
                    counters.evaluations.fetch_add(1, Ordering::Relaxed);
                    return Self::evaluate(board);
                }

                let outcomes = self.config.spawn.outcomes();
                let mut total_score = 0.0;
                for &cell in &cells {
                    for &(value, probability) in &outcomes {
                        let mut child = *board;
                        child.insert_tile(cell, value);
                        total_score +=
                            probability * self.expectimax(&child, depth - 1, Turn::Player, counters);
                    }
                }
                total_score / cells.len() as f64
            }
        }
    }

    /// Static heuristic: each tile scores `value + 10 * log2(value)`
    pub fn evaluate(board: &Board) -> f64 {
        board
            .to_flat()
            .iter()
            .filter(|&&value| value != 0)
            .map(|&value| {
                let value = value as f64;
                value + value.log2() * 10.0
            })
            .sum()
    }
}
