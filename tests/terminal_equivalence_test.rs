// Randomized check that the terminal scan agrees with move simulation
//
// `Board::is_terminal` inspects empty cells and adjacent pairs instead of
// playing all four moves. For every non-empty board the two must agree,
// including boards where only capped tiles sit next to each other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use capped_2048_ai::board::{Board, TILE_COUNT};
use capped_2048_ai::types::Direction;

fn terminal_by_simulation(board: &Board) -> bool {
    Direction::all().iter().all(|&direction| {
        let mut probe = *board;
        !probe.apply_move(direction)
    })
}

fn random_board(rng: &mut StdRng, palette: &[u32], merge_cap: u32) -> Board {
    let mut values = [0u32; TILE_COUNT];
    for value in values.iter_mut() {
        *value = palette[rng.random_range(0..palette.len())];
    }
    Board::from_flat(&values, merge_cap)
}

#[test]
fn test_terminal_scan_matches_simulation() {
    let mut rng = StdRng::seed_from_u64(2048);
    // Few distinct values and rare blanks so full and terminal boards show up
    let palettes: [&[u32]; 3] = [
        &[0, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048],
        &[2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048],
        &[1024, 2048, 4, 8],
    ];

    let mut terminal_seen = 0;
    for palette in palettes {
        for _ in 0..5_000 {
            let board = random_board(&mut rng, palette, 1024);
            if board.tile_count() == 0 {
                continue;
            }
            let expected = terminal_by_simulation(&board);
            assert_eq!(board.is_terminal(), expected, "disagreement on\n{}", board);
            if expected {
                terminal_seen += 1;
            }
        }
    }

    assert!(terminal_seen > 0, "sample should contain terminal boards");
}

#[test]
fn test_terminal_scan_respects_lower_caps() {
    let mut rng = StdRng::seed_from_u64(7);
    for merge_cap in [4, 16, 256] {
        for _ in 0..2_000 {
            let board = random_board(&mut rng, &[2, 4, 8, 16, 32], merge_cap);
            assert_eq!(board.is_terminal(), terminal_by_simulation(&board));
        }
    }
}
