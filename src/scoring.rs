//! Scoring capabilities that guide the solver.
//!
//! A scorer ranks candidate moves; the solver expands higher-scored
//! candidates sooner. Scorers may keep internal state across calls, but
//! that state belongs to a single solve run: [`ScoreMethod::begin`] runs
//! once before each run and must reset it.

use crate::grid::Grid;
use crate::puzzle::{PieceSet, Placement};

/// Inputs available when ranking one candidate move.
pub struct ScoreContext<'a> {
    /// The candidate placement.
    pub placement: &'a Placement,
    /// The oriented shape the placement stamps onto the board.
    pub piece_grid: &'a Grid,
    /// Occupancy after committing the placement.
    pub occupancy: &'a Grid,
    /// Pieces still unplaced after the placement.
    pub remaining: PieceSet,
    /// All committed placements including the candidate.
    pub placements: &'a [Placement],
}

/// A caller-supplied ranking capability.
pub trait ScoreMethod {
    /// Invoked once before a solve run starts.
    fn begin(&mut self) {}

    /// Ranks a candidate move. Higher scores are explored sooner.
    fn score(&mut self, ctx: &ScoreContext<'_>) -> f64;
}

/// Logicless sweep: every candidate outranks all earlier ones, so the
/// solver always expands the newest state first. Useful as a baseline and
/// as a test oracle.
#[derive(Debug, Default)]
pub struct BruteForce {
    moves_seen: u64,
}

impl BruteForce {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreMethod for BruteForce {
    fn begin(&mut self) {
        self.moves_seen = 0;
    }

    fn score(&mut self, _ctx: &ScoreContext<'_>) -> f64 {
        self.moves_seen += 1;
        self.moves_seen as f64
    }
}

/// Prefers placements with maximal contact against board edges, blocked
/// cells and already-placed pieces. Snug fits leave fewer awkward gaps.
#[derive(Debug, Default)]
pub struct Snug;

impl Snug {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreMethod for Snug {
    fn score(&mut self, ctx: &ScoreContext<'_>) -> f64 {
        let shape = ctx.piece_grid;
        let occupancy = ctx.occupancy;
        let (row, col) = (ctx.placement.row, ctx.placement.col);
        let mut contact = 0u32;

        for r in 0..shape.height() {
            for c in 0..shape.width() {
                if shape.get(r, c) == 0 {
                    continue;
                }
                let (board_row, board_col) = (row + r, col + c);
                for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
                    let nr = board_row as i64 + dr;
                    let nc = board_col as i64 + dc;
                    if nr < 0
                        || nc < 0
                        || nr >= occupancy.height() as i64
                        || nc >= occupancy.width() as i64
                    {
                        contact += 1;
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    // occupancy already contains the candidate's own cells,
                    // so exclude the footprint itself
                    let in_footprint = nr >= row
                        && nc >= col
                        && nr - row < shape.height()
                        && nc - col < shape.width()
                        && shape.get(nr - row, nc - col) != 0;
                    if !in_footprint && occupancy.get(nr, nc) != 0 {
                        contact += 1;
                    }
                }
            }
        }

        f64::from(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::{legal_moves, Move};
    use crate::pieces::Piece;
    use crate::puzzle::{Board, Puzzle};

    fn context_for<'a>(candidate: &'a Move, piece_grid: &'a Grid) -> ScoreContext<'a> {
        ScoreContext {
            placement: &candidate.placement,
            piece_grid,
            occupancy: candidate.state.occupancy(),
            remaining: candidate.state.remaining(),
            placements: candidate.state.placements(),
        }
    }

    #[test]
    fn test_brute_force_counts_upward() {
        let puzzle = Puzzle::new(Board::open(1, 2), vec![Piece::parse("D", "XX").unwrap()])
            .unwrap();
        let state = puzzle.initial_state(&[]).unwrap();
        let moves = legal_moves(&puzzle, &state);
        let grid = puzzle.oriented_grid(&moves[0].placement);

        let mut scorer = BruteForce::new();
        scorer.begin();
        let first = scorer.score(&context_for(&moves[0], &grid));
        let second = scorer.score(&context_for(&moves[0], &grid));
        assert!(second > first);
        scorer.begin();
        assert_eq!(scorer.score(&context_for(&moves[0], &grid)), first);
    }

    #[test]
    fn test_snug_prefers_the_corner() {
        let puzzle = Puzzle::new(Board::open(3, 4), vec![Piece::parse("O", "XX\nXX").unwrap()])
            .unwrap();
        let state = puzzle.initial_state(&[]).unwrap();
        let mut scorer = Snug::new();
        let mut best: Option<(Placement, f64)> = None;
        for candidate in legal_moves(&puzzle, &state) {
            let grid = puzzle.oriented_grid(&candidate.placement);
            let score = scorer.score(&context_for(&candidate, &grid));
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate.placement, score));
            }
        }
        let (placement, score) = best.unwrap();
        // a corner placement touches two walls with two cells each
        assert_eq!(score, 4.0);
        assert_eq!((placement.row, placement.col), (0, 0));
    }
}
