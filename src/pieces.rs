//! Puzzle piece definitions and orientation canonicalization.
//!
//! A piece owns one canonical shape plus the subset of the 8 mirror/rotate
//! combinations that produce geometrically distinct shapes. Symmetric
//! pieces keep fewer orientations: a 2x2 square keeps 1, a piece with a
//! single axis of symmetry keeps 4, a fully asymmetric piece keeps all 8.

use crate::geometry::{mirror, rotate};
use crate::grid::{Grid, GridError};
use crate::puzzle::Placement;

/// One mirror/rotate combination. The mirror (a transposition) is applied
/// before the anticlockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub mirrored: bool,
    pub rotations: u8,
}

impl Orientation {
    /// The untransformed orientation, always first in a piece's set.
    pub const IDENTITY: Self = Self {
        mirrored: false,
        rotations: 0,
    };

    /// Applies this transform to a grid.
    pub fn apply(self, grid: &Grid) -> Grid {
        rotate(&mirror(grid, self.mirrored), usize::from(self.rotations))
    }
}

/// A piece shape under one accepted orientation, with cached anchor data.
#[derive(Debug, Clone)]
pub struct OrientedShape {
    pub orientation: Orientation,
    /// The piece shape after applying `orientation`.
    pub grid: Grid,
    /// Row-major first filled cell of `grid`, used to anchor placements.
    pub first_filled: (usize, usize),
}

/// A named tile shape with its derived orientation set.
#[derive(Debug, Clone)]
pub struct Piece {
    name: String,
    shape: Grid,
    orientations: Vec<OrientedShape>,
}

impl Piece {
    /// Creates a piece and derives its canonical orientation set.
    ///
    /// The shape must be binary and contain at least one filled cell.
    pub fn new(name: impl Into<String>, shape: Grid) -> Result<Self, GridError> {
        for (row, col) in all_coordinates(&shape) {
            let value = shape.get(row, col);
            if value > 1 {
                return Err(GridError::NonBinaryCell { row, col, value });
            }
        }
        if shape.first_filled().is_none() {
            return Err(GridError::EmptyShape);
        }

        let mut orientations: Vec<OrientedShape> = Vec::new();
        for mirrored in [false, true] {
            for rotations in 0..4 {
                let orientation = Orientation {
                    mirrored,
                    rotations,
                };
                let grid = orientation.apply(&shape);
                if orientations.iter().any(|known| known.grid == grid) {
                    continue;
                }
                let Some(first_filled) = grid.first_filled() else {
                    continue;
                };
                orientations.push(OrientedShape {
                    orientation,
                    grid,
                    first_filled,
                });
            }
        }

        Ok(Self {
            name: name.into(),
            shape,
            orientations,
        })
    }

    /// Parses a piece from a grid drawing (see [`Grid::parse`]).
    pub fn parse(name: impl Into<String>, art: &str) -> Result<Self, GridError> {
        Self::new(name, Grid::parse(art)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical (identity-orientation) shape.
    pub fn shape(&self) -> &Grid {
        &self.shape
    }

    /// The distinct orientations, identity first.
    pub fn orientations(&self) -> &[OrientedShape] {
        &self.orientations
    }

    /// Cells covered by the piece.
    pub fn area(&self) -> usize {
        self.shape.filled_count()
    }
}

fn all_coordinates(grid: &Grid) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..grid.height()).flat_map(move |row| (0..grid.width()).map(move |col| (row, col)))
}

/// The twelve sample pieces for the standard 5x11 tray.
///
/// Their areas sum to 55, exactly covering the open board;
/// [`sample_tiling`] records one complete packing.
pub fn sample_set() -> Vec<Piece> {
    SAMPLE_PIECES
        .iter()
        .map(|&(name, art)| Piece::parse(name, art).expect("sample piece art is valid"))
        .collect()
}

/// Name and drawing of each sample piece.
const SAMPLE_PIECES: &[(&str, &str)] = &[
    ("A", "XXXX"),
    ("B", "XX\nX.\nX."),
    ("C", ".XX\nXX."),
    ("D", ".X\nXX\n.X"),
    ("E", ".X.\nXXX"),
    ("F", "XX\nXX\nX."),
    ("G", ".X\nXX\nXX"),
    ("H", "XX\nX.\nX.\nX."),
    ("I", ".X\n.X\n.X\nXX"),
    ("J", "X\nX\nX\nX\nX"),
    ("K", "XX\nXX\n.X"),
    ("L", "X.\nXX\nXX"),
];

/// A known complete tiling of the standard board by [`sample_set`].
///
/// Every piece sits in its identity orientation. Used by tests and as a
/// seeding example.
pub fn sample_tiling() -> Vec<Placement> {
    const ANCHORS: [(usize, usize); 12] = [
        (0, 0),
        (1, 0),
        (1, 1),
        (2, 2),
        (3, 0),
        (0, 4),
        (2, 4),
        (0, 6),
        (1, 6),
        (0, 8),
        (0, 9),
        (2, 9),
    ];
    ANCHORS
        .iter()
        .enumerate()
        .map(|(piece, &(row, col))| Placement {
            piece,
            orientation: Orientation::IDENTITY,
            row,
            col,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_orientation_is_first() {
        for piece in sample_set() {
            let first = &piece.orientations()[0];
            assert_eq!(first.orientation, Orientation::IDENTITY);
            assert_eq!(&first.grid, piece.shape());
        }
    }

    #[test]
    fn test_orientation_count_divides_eight() {
        for piece in sample_set() {
            let count = piece.orientations().len();
            assert_eq!(8 % count, 0, "piece {}: {} orientations", piece.name(), count);
        }
    }

    #[test]
    fn test_square_has_one_orientation() {
        let square = Piece::parse("O", "XX\nXX").unwrap();
        assert_eq!(square.orientations().len(), 1);
    }

    #[test]
    fn test_line_has_two_orientations() {
        let line = Piece::parse("I", "XXXX").unwrap();
        assert_eq!(line.orientations().len(), 2);
    }

    #[test]
    fn test_single_symmetry_has_four_orientations() {
        let tee = Piece::parse("T", ".X.\nXXX").unwrap();
        assert_eq!(tee.orientations().len(), 4);
        let ess = Piece::parse("S", ".XX\nXX.").unwrap();
        assert_eq!(ess.orientations().len(), 4);
    }

    #[test]
    fn test_asymmetric_piece_has_eight_orientations() {
        let ell = Piece::parse("L", "XX\nX.\nX.").unwrap();
        assert_eq!(ell.orientations().len(), 8);
    }

    #[test]
    fn test_orientations_are_pairwise_distinct() {
        let ell = Piece::parse("L", "XX\nX.\nX.").unwrap();
        let shapes = ell.orientations();
        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i + 1..] {
                assert_ne!(a.grid, b.grid);
            }
        }
    }

    #[test]
    fn test_first_filled_tracks_orientation() {
        let dee = Piece::parse("D", ".X\nXX\n.X").unwrap();
        for oriented in dee.orientations() {
            assert_eq!(oriented.grid.first_filled(), Some(oriented.first_filled));
        }
    }

    #[test]
    fn test_rejects_empty_shape() {
        let blank = Grid::parse("..\n..").unwrap();
        assert!(matches!(Piece::new("Z", blank), Err(GridError::EmptyShape)));
    }

    #[test]
    fn test_sample_set_covers_the_standard_board() {
        let total: usize = sample_set().iter().map(Piece::area).sum();
        assert_eq!(total, 55);
    }
}
