//! Boards, placements and puzzle state.
//!
//! A [`Puzzle`] pairs a fixed board with a fixed piece roster. Search
//! operates over [`PuzzleState`] values: the current occupancy grid, the
//! bitmask of pieces not yet placed, and the placements committed so far.
//! States are immutable; committing a placement produces a new state.

use std::fmt;

use crate::geometry::stamp;
use crate::grid::{Grid, GridError};
use crate::pieces::Piece;

/// Maximum roster size, bounded by the remaining-piece bitmask.
pub const MAX_PIECES: usize = 32;

/// Standard tray dimensions.
pub const STANDARD_HEIGHT: usize = 5;
pub const STANDARD_WIDTH: usize = 11;

/// Errors raised while constructing a puzzle or seeding its initial state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// A board or piece grid failed validation.
    #[display("invalid grid: {_0}")]
    Grid(GridError),
    /// The roster exceeds the bitmask capacity.
    #[display("roster holds {count} pieces, limit is {MAX_PIECES}")]
    #[from(ignore)]
    RosterTooLarge { count: usize },
    /// A seed placement names a piece outside the roster.
    #[display("seed placement {index} names unknown piece {piece}")]
    #[from(ignore)]
    UnknownPiece { index: usize, piece: usize },
    /// A seed placement reuses a piece an earlier seed already placed.
    #[display("seed placement {index} reuses piece {piece}")]
    #[from(ignore)]
    PieceReused { index: usize, piece: usize },
    /// A seed placement collides with the board or an earlier seed, or
    /// overhangs the board edge.
    #[display("seed placement {index} conflicts with the board or an earlier seed")]
    #[from(ignore)]
    SeedConflict { index: usize },
}

/// The fixed cell mask a puzzle is played on: 1 = placeable, 0 = blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    mask: Grid,
}

impl Board {
    /// Wraps a binary placeable-cell mask.
    pub fn new(mask: Grid) -> Result<Self, GridError> {
        for row in 0..mask.height() {
            for col in 0..mask.width() {
                let value = mask.get(row, col);
                if value > 1 {
                    return Err(GridError::NonBinaryCell { row, col, value });
                }
            }
        }
        Ok(Self { mask })
    }

    /// A fully open board of the given dimensions.
    pub fn open(height: usize, width: usize) -> Self {
        Self {
            mask: Grid::filled(height, width),
        }
    }

    /// The standard fully open 5x11 tray.
    pub fn standard() -> Self {
        Self::open(STANDARD_HEIGHT, STANDARD_WIDTH)
    }

    pub fn mask(&self) -> &Grid {
        &self.mask
    }

    pub fn height(&self) -> usize {
        self.mask.height()
    }

    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// Starting occupancy: blocked cells are pre-filled, placeable cells empty.
    pub fn initial_occupancy(&self) -> Grid {
        let cells = self.mask.cells().iter().map(|&cell| 1 - cell).collect();
        Grid::from_raw(self.height(), self.width(), cells)
    }
}

/// One piece, in one orientation, anchored at one board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index into the puzzle's piece roster.
    pub piece: usize,
    pub orientation: crate::pieces::Orientation,
    /// Top-left anchor row of the oriented shape on the board.
    pub row: usize,
    /// Top-left anchor column of the oriented shape on the board.
    pub col: usize,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "piece {} at ({}, {}) [mirror={}, rot={}]",
            self.piece, self.row, self.col, self.orientation.mirrored, self.orientation.rotations
        )
    }
}

/// A cheap-to-copy subset of the puzzle's piece roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSet(u32);

impl PieceSet {
    /// The full roster of `count` pieces.
    pub fn full(count: usize) -> Self {
        debug_assert!(count <= MAX_PIECES);
        if count == MAX_PIECES {
            Self(u32::MAX)
        } else {
            Self((1 << count) - 1)
        }
    }

    pub fn contains(self, piece: usize) -> bool {
        piece < MAX_PIECES && self.0 & (1 << piece) != 0
    }

    /// This set with `piece` removed.
    pub fn without(self, piece: usize) -> Self {
        Self(self.0 & !(1 << piece))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member piece indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_PIECES).filter(move |&piece| self.0 & (1 << piece) != 0)
    }

    /// The raw bitmask, used for visited-state keys.
    pub fn bits(self) -> u32 {
        self.0
    }
}

/// A board plus a fixed piece roster.
#[derive(Debug, Clone)]
pub struct Puzzle {
    board: Board,
    pieces: Vec<Piece>,
}

impl Puzzle {
    pub fn new(board: Board, pieces: Vec<Piece>) -> Result<Self, PuzzleError> {
        if pieces.len() > MAX_PIECES {
            return Err(PuzzleError::RosterTooLarge {
                count: pieces.len(),
            });
        }
        Ok(Self { board, pieces })
    }

    /// The standard tray with the sample piece set.
    pub fn sample() -> Self {
        Self::new(Board::standard(), crate::pieces::sample_set())
            .expect("sample roster fits the bitmask")
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The shape a placement stamps onto the board.
    ///
    /// Resolves to the piece's cached orientation when the placement uses a
    /// canonical one, otherwise applies the transform directly.
    pub fn oriented_grid(&self, placement: &Placement) -> Grid {
        let piece = &self.pieces[placement.piece];
        piece
            .orientations()
            .iter()
            .find(|oriented| oriented.orientation == placement.orientation)
            .map_or_else(
                || placement.orientation.apply(piece.shape()),
                |oriented| oriented.grid.clone(),
            )
    }

    /// Builds the starting state, committing and validating each seed
    /// placement in order.
    pub fn initial_state(&self, seeds: &[Placement]) -> Result<PuzzleState, PuzzleError> {
        let mut occupancy = self.board.initial_occupancy();
        let mut remaining = PieceSet::full(self.pieces.len());
        let mut placements = Vec::with_capacity(seeds.len());

        for (index, seed) in seeds.iter().enumerate() {
            if seed.piece >= self.pieces.len() {
                return Err(PuzzleError::UnknownPiece {
                    index,
                    piece: seed.piece,
                });
            }
            if !remaining.contains(seed.piece) {
                return Err(PuzzleError::PieceReused {
                    index,
                    piece: seed.piece,
                });
            }
            let shape = self.oriented_grid(seed);
            match stamp(&shape, &occupancy, seed.row, seed.col) {
                Ok(Some(next)) => occupancy = next,
                Ok(None) | Err(_) => return Err(PuzzleError::SeedConflict { index }),
            }
            remaining = remaining.without(seed.piece);
            placements.push(*seed);
        }

        Ok(PuzzleState {
            occupancy,
            remaining,
            placements,
        })
    }
}

/// A partial packing: occupancy, unplaced pieces and committed placements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    occupancy: Grid,
    remaining: PieceSet,
    placements: Vec<Placement>,
}

impl PuzzleState {
    /// The current occupancy grid: 0 = empty, 1 = filled or blocked.
    pub fn occupancy(&self) -> &Grid {
        &self.occupancy
    }

    /// Pieces not yet placed.
    pub fn remaining(&self) -> PieceSet {
        self.remaining
    }

    /// Placements committed so far, in order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Empty cells of the current occupancy, row-major.
    pub fn holes(&self) -> Vec<(usize, usize)> {
        self.occupancy.holes()
    }

    /// True when the occupancy has no empty cell left.
    pub fn is_complete(&self) -> bool {
        self.occupancy.cells().iter().all(|&cell| cell != 0)
    }

    /// A new state with one more placement committed. The caller supplies
    /// the already collision-checked occupancy.
    pub(crate) fn advanced(&self, placement: Placement, occupancy: Grid) -> Self {
        let mut placements = self.placements.clone();
        placements.push(placement);
        Self {
            occupancy,
            remaining: self.remaining.without(placement.piece),
            placements,
        }
    }
}

/// Formats a packing as a character grid.
///
/// Cells show the 1-based piece number (hex past 9), `.` for uncovered
/// placeable cells and `#` for blocked board cells.
pub fn format_solution(puzzle: &Puzzle, placements: &[Placement]) -> String {
    let board = puzzle.board();
    let (height, width) = (board.height(), board.width());
    let mut numbers = vec![0u8; height * width];

    for placement in placements {
        let shape = puzzle.oriented_grid(placement);
        let number = (placement.piece + 1) as u8;
        for r in 0..shape.height() {
            for c in 0..shape.width() {
                if shape.get(r, c) != 0 {
                    numbers[(placement.row + r) * width + placement.col + c] = number;
                }
            }
        }
    }

    let mut output = String::with_capacity(height * (width + 1));
    for row in 0..height {
        for col in 0..width {
            let number = numbers[row * width + col];
            let display_char = if number == 0 {
                if board.mask().get(row, col) == 0 {
                    '#'
                } else {
                    '.'
                }
            } else if number < 10 {
                char::from(b'0' + number)
            } else {
                // hex for piece numbers >= 10
                char::from(b'A' + number - 10)
            };
            output.push(display_char);
        }
        output.push('\n');
    }
    output
}
