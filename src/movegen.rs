//! Legal move enumeration.
//!
//! Rather than trying every orientation at every board cell, candidate
//! placements are anchored at the current holes: an oriented shape whose
//! row-major first filled cell sits at offset `(dr, dc)` can cover hole
//! `(hr, hc)` only when anchoring it at `(hr - dr, hc - dc)` keeps the
//! whole shape on the board. Surviving anchors are then collision-checked
//! against the occupancy grid.

use log::trace;

use crate::geometry::stamp;
use crate::puzzle::{Placement, Puzzle, PuzzleState};

/// One legal move: the placement and the state it leads to.
#[derive(Debug, Clone)]
pub struct Move {
    pub placement: Placement,
    pub state: PuzzleState,
}

/// Enumerates every placement of a remaining piece that fits on the board
/// and collides with nothing.
///
/// An empty result is a normal outcome (a dead end, or a finished board),
/// not an error.
pub fn legal_moves(puzzle: &Puzzle, state: &PuzzleState) -> Vec<Move> {
    let occupancy = state.occupancy();
    let holes = occupancy.holes();
    if holes.is_empty() {
        return Vec::new();
    }
    let (board_height, board_width) = (occupancy.height(), occupancy.width());

    let mut moves = Vec::new();
    for piece_index in state.remaining().iter() {
        let piece = &puzzle.pieces()[piece_index];
        for oriented in piece.orientations() {
            let (shape_height, shape_width) = (oriented.grid.height(), oriented.grid.width());
            if shape_height > board_height || shape_width > board_width {
                continue;
            }
            let (dr, dc) = oriented.first_filled;
            for &(hole_row, hole_col) in &holes {
                let Some(row) = hole_row.checked_sub(dr) else {
                    continue;
                };
                let Some(col) = hole_col.checked_sub(dc) else {
                    continue;
                };
                if row > board_height - shape_height || col > board_width - shape_width {
                    continue;
                }
                // bounds were checked above, so stamp can only succeed or collide
                if let Ok(Some(next_occupancy)) = stamp(&oriented.grid, occupancy, row, col) {
                    let placement = Placement {
                        piece: piece_index,
                        orientation: oriented.orientation,
                        row,
                        col,
                    };
                    moves.push(Move {
                        placement,
                        state: state.advanced(placement, next_occupancy),
                    });
                }
            }
        }
    }

    trace!(
        "{} legal moves from {} holes and {} remaining pieces",
        moves.len(),
        holes.len(),
        state.remaining().len()
    );
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::pieces::{sample_tiling, Orientation, Piece};
    use crate::puzzle::Board;

    fn puzzle_with(board: Board, arts: &[&str]) -> Puzzle {
        let pieces = arts
            .iter()
            .enumerate()
            .map(|(index, art)| Piece::parse(format!("{index}"), art).unwrap())
            .collect();
        Puzzle::new(board, pieces).unwrap()
    }

    #[test]
    fn test_single_square_on_square_board() {
        let puzzle = puzzle_with(Board::open(2, 2), &["XX\nXX"]);
        let state = puzzle.initial_state(&[]).unwrap();
        let moves = legal_moves(&puzzle, &state);
        assert_eq!(moves.len(), 1);
        let only = &moves[0];
        assert_eq!(
            only.placement,
            Placement {
                piece: 0,
                orientation: Orientation::IDENTITY,
                row: 0,
                col: 0,
            }
        );
        assert!(only.state.is_complete());
        assert!(only.state.remaining().is_empty());
    }

    #[test]
    fn test_domino_anchors_on_a_strip() {
        let puzzle = puzzle_with(Board::open(1, 4), &["XX"]);
        let state = puzzle.initial_state(&[]).unwrap();
        let moves = legal_moves(&puzzle, &state);
        // the vertical orientation never fits, the horizontal one at cols 0..=2
        let mut cols: Vec<usize> = moves.iter().map(|m| m.placement.col).collect();
        cols.sort_unstable();
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_moves_on_a_full_board() {
        let puzzle = Puzzle::sample();
        let state = puzzle.initial_state(&sample_tiling()).unwrap();
        assert!(legal_moves(&puzzle, &state).is_empty());
    }

    #[test]
    fn test_moves_never_collide() {
        let board = Board::new(Grid::parse("X.X\nXXX").unwrap()).unwrap();
        let puzzle = puzzle_with(board, &["XX", "X\nX"]);
        let state = puzzle.initial_state(&[]).unwrap();
        for candidate in legal_moves(&puzzle, &state) {
            assert!(candidate.state.occupancy().is_binary());
            assert_eq!(
                candidate.state.occupancy().filled_count(),
                state.occupancy().filled_count() + 2
            );
        }
    }

    #[test]
    fn test_move_consumes_exactly_one_piece() {
        let puzzle = puzzle_with(Board::open(2, 3), &["XX", "X"]);
        let state = puzzle.initial_state(&[]).unwrap();
        for candidate in legal_moves(&puzzle, &state) {
            assert_eq!(candidate.state.remaining().len(), 1);
            assert!(!candidate
                .state
                .remaining()
                .contains(candidate.placement.piece));
            assert_eq!(candidate.state.placements().len(), 1);
        }
    }

    #[test]
    fn test_oversized_piece_yields_nothing() {
        let puzzle = puzzle_with(Board::open(1, 3), &["XXXX"]);
        let state = puzzle.initial_state(&[]).unwrap();
        assert!(legal_moves(&puzzle, &state).is_empty());
    }
}
