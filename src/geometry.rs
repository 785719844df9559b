//! 2D grid transforms: rotation, mirroring and overlay.
//!
//! Mirroring is defined as transposition rather than a horizontal flip.
//! Combined with anticlockwise quarter turns, the mirror-then-rotate
//! product enumerates the full dihedral group of 8 transforms used for
//! piece orientation dedup in [`crate::pieces`].

use crate::grid::{Grid, GridError};

/// Rotates a grid 90 degrees anticlockwise `steps` times.
///
/// Four successive rotations return the original grid, so `steps` is
/// reduced modulo 4 before rotating.
pub fn rotate(grid: &Grid, steps: usize) -> Grid {
    let mut rotated = grid.clone();
    for _ in 0..steps % 4 {
        rotated = rotate_once(&rotated);
    }
    rotated
}

/// One anticlockwise quarter turn: cell `(r, c)` moves to `(w - 1 - c, r)`.
fn rotate_once(grid: &Grid) -> Grid {
    let (height, width) = (grid.height(), grid.width());
    let mut cells = vec![0; height * width];
    for row in 0..height {
        for col in 0..width {
            cells[(width - 1 - col) * height + row] = grid.get(row, col);
        }
    }
    Grid::from_raw(width, height, cells)
}

/// Returns the transpose of `grid` iff `flip` is set, else a copy.
pub fn mirror(grid: &Grid, flip: bool) -> Grid {
    if !flip {
        return grid.clone();
    }
    let (height, width) = (grid.height(), grid.width());
    let mut cells = vec![0; height * width];
    for row in 0..height {
        for col in 0..width {
            cells[col * height + row] = grid.get(row, col);
        }
    }
    Grid::from_raw(width, height, cells)
}

/// Checks that `small` placed at `(row, col)` stays inside `large`.
fn check_bounds(small: &Grid, large: &Grid, row: usize, col: usize) -> Result<(), GridError> {
    if row + small.height() > large.height() || col + small.width() > large.width() {
        return Err(GridError::OutOfBounds {
            height: small.height(),
            width: small.width(),
            row,
            col,
            target_height: large.height(),
            target_width: large.width(),
        });
    }
    Ok(())
}

/// Adds `small` onto `large` at offset `(row, col)`, cell by cell.
///
/// The result has the dimensions of `large` and may contain cells with
/// value 2 where both inputs were filled. A 2 signals a collision and must
/// be handled by the caller; it is never silently clamped.
pub fn overlay(small: &Grid, large: &Grid, row: usize, col: usize) -> Result<Grid, GridError> {
    check_bounds(small, large, row, col)?;
    let mut cells = large.cells().to_vec();
    for r in 0..small.height() {
        for c in 0..small.width() {
            cells[(row + r) * large.width() + (col + c)] += small.get(r, c);
        }
    }
    Ok(Grid::from_raw(large.height(), large.width(), cells))
}

/// Collision-checked overlay of two binary grids.
///
/// Returns `Ok(None)` when any filled cell of `small` lands on a filled
/// cell of `large`, otherwise the binary union. Unlike [`overlay`] the
/// result never carries a collision marker, so it is safe to commit as
/// puzzle occupancy.
pub fn stamp(
    small: &Grid,
    large: &Grid,
    row: usize,
    col: usize,
) -> Result<Option<Grid>, GridError> {
    check_bounds(small, large, row, col)?;
    let mut cells = large.cells().to_vec();
    for r in 0..small.height() {
        for c in 0..small.width() {
            if small.get(r, c) == 0 {
                continue;
            }
            let cell = &mut cells[(row + r) * large.width() + (col + c)];
            if *cell != 0 {
                return Ok(None);
            }
            *cell = 1;
        }
    }
    Ok(Some(Grid::from_raw(large.height(), large.width(), cells)))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn l_shape() -> Grid {
        Grid::parse("X.\nX.\nXX").unwrap()
    }

    #[test]
    fn test_rotate_quarter_turn_is_anticlockwise() {
        // anticlockwise: the rightmost column becomes the top row
        let rotated = rotate(&l_shape(), 1);
        assert_eq!(rotated.height(), 2);
        assert_eq!(rotated.width(), 3);
        assert_eq!(rotated.render(), "..X\nXXX\n");
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let shape = l_shape();
        assert_eq!(rotate(&shape, 4), shape);
        assert_eq!(rotate(&shape, 0), shape);
    }

    #[test]
    fn test_mirror_is_transpose() {
        let shape = Grid::parse("XX.\nX.X").unwrap();
        assert_eq!(mirror(&shape, false), shape);
        assert_eq!(mirror(&shape, true).render(), "XX\nX.\n.X\n");
    }

    #[test]
    fn test_overlay_adds_cells() {
        let small = Grid::parse("XX").unwrap();
        let large = Grid::parse("...\n..X").unwrap();
        let merged = overlay(&small, &large, 0, 1).unwrap();
        assert_eq!(merged.cells(), &[0, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_overlay_twice_at_same_anchor_reports_collision() {
        let small = Grid::parse("XX").unwrap();
        let large = Grid::parse("...\n...").unwrap();
        let once = overlay(&small, &large, 1, 0).unwrap();
        let twice = overlay(&small, &once, 1, 0).unwrap();
        assert!(twice.cells().contains(&2));
    }

    #[test]
    fn test_overlay_rejects_overhang() {
        let small = Grid::parse("XX").unwrap();
        let large = Grid::parse("..\n..").unwrap();
        assert!(matches!(
            overlay(&small, &large, 0, 1),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            overlay(&small, &large, 2, 0),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_stamp_detects_collision_without_sentinel() {
        let small = Grid::parse("XX").unwrap();
        let large = Grid::parse("...\n...").unwrap();
        let once = stamp(&small, &large, 0, 0).unwrap().unwrap();
        assert!(once.is_binary());
        assert_eq!(stamp(&small, &once, 0, 1).unwrap(), None);
        let disjoint = stamp(&small, &once, 1, 0).unwrap().unwrap();
        assert!(disjoint.is_binary());
        assert_eq!(disjoint.filled_count(), 4);
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..6, 1usize..6).prop_flat_map(|(height, width)| {
            proptest::collection::vec(0u8..=1, height * width)
                .prop_map(move |cells| Grid::from_raw(height, width, cells))
        })
    }

    proptest! {
        #[test]
        fn prop_rotate_four_is_identity(grid in arb_grid()) {
            prop_assert_eq!(rotate(&grid, 4), grid);
        }

        #[test]
        fn prop_mirror_twice_is_identity(grid in arb_grid()) {
            prop_assert_eq!(mirror(&mirror(&grid, true), true), grid);
        }

        #[test]
        fn prop_transforms_preserve_filled_count(grid in arb_grid(), steps in 0usize..8) {
            prop_assert_eq!(rotate(&grid, steps).filled_count(), grid.filled_count());
            prop_assert_eq!(mirror(&grid, true).filled_count(), grid.filled_count());
        }
    }
}
