//! The symmetry group of the square and the serializations it produces.

use crate::grid::Grid;
use strum::IntoEnumIterator;
use tracing::instrument;

/// One of the eight symmetries of a square (the dihedral group D4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, derive_more::Display)]
pub enum Symmetry {
    /// No change.
    #[display("identity")]
    Identity,
    /// 90° clockwise rotation.
    #[display("rotate 90")]
    Rotate90,
    /// 180° rotation.
    #[display("rotate 180")]
    Rotate180,
    /// 270° clockwise rotation.
    #[display("rotate 270")]
    Rotate270,
    /// Left-right mirror.
    #[display("mirror")]
    Mirror,
    /// Top-bottom flip.
    #[display("flip")]
    Flip,
    /// Reflection across the main diagonal.
    #[display("transpose")]
    Transpose,
    /// Reflection across the anti-diagonal.
    #[display("anti-transpose")]
    AntiTranspose,
}

impl Symmetry {
    /// All eight symmetries, identity first.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Applies this symmetry to `grid` in place.
    pub fn apply_in_place(self, grid: &mut Grid) {
        match self {
            Symmetry::Identity => {}
            Symmetry::Rotate90 => grid.rotate_clockwise(),
            Symmetry::Rotate180 => {
                grid.rotate_clockwise();
                grid.rotate_clockwise();
            }
            Symmetry::Rotate270 => {
                grid.rotate_clockwise();
                grid.rotate_clockwise();
                grid.rotate_clockwise();
            }
            Symmetry::Mirror => grid.mirror_horizontal(),
            Symmetry::Flip => grid.flip_vertical(),
            // rotate then mirror maps (r, c) to (c, r)
            Symmetry::Transpose => {
                grid.rotate_clockwise();
                grid.mirror_horizontal();
            }
            // rotate then flip maps (r, c) to (n-1-c, n-1-r)
            Symmetry::AntiTranspose => {
                grid.rotate_clockwise();
                grid.flip_vertical();
            }
        }
    }

    /// Returns a transformed copy of `grid`, leaving the original untouched.
    pub fn apply(self, grid: &Grid) -> Grid {
        let mut image = grid.clone();
        self.apply_in_place(&mut image);
        image
    }
}

/// Serializations of all eight symmetric images of `grid`.
///
/// The input is never mutated. Grids with internal symmetry yield duplicate
/// entries; callers only test membership.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn equivalent_serializations(grid: &Grid) -> Vec<String> {
    Symmetry::all()
        .map(|symmetry| symmetry.apply(grid).serialize())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn counting_grid() -> Grid {
        let mut grid = Grid::new(3).unwrap();
        for (i, (row, col)) in (1..=3)
            .flat_map(|r| (1..=3).map(move |c| (r, c)))
            .enumerate()
        {
            grid.set(row, col, i as i32 + 1).unwrap();
        }
        grid
    }

    #[test]
    fn test_eight_symmetries() {
        assert_eq!(Symmetry::all().count(), 8);
    }

    #[test]
    fn test_asymmetric_grid_has_eight_distinct_images() {
        let images: HashSet<_> = equivalent_serializations(&counting_grid())
            .into_iter()
            .collect();
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn test_transpose() {
        let image = Symmetry::Transpose.apply(&counting_grid());
        assert_eq!(image.cells(), &[1, 4, 7, 2, 5, 8, 3, 6, 9]);
    }

    #[test]
    fn test_anti_transpose() {
        let image = Symmetry::AntiTranspose.apply(&counting_grid());
        assert_eq!(image.cells(), &[9, 6, 3, 8, 5, 2, 7, 4, 1]);
    }

    #[test]
    fn test_rotate_180() {
        let image = Symmetry::Rotate180.apply(&counting_grid());
        assert_eq!(image.cells(), &[9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_enumeration_does_not_mutate_input() {
        let grid = counting_grid();
        let _ = equivalent_serializations(&grid);
        assert_eq!(grid, counting_grid());
    }

    #[test]
    fn test_identity_comes_first() {
        let grid = counting_grid();
        assert_eq!(equivalent_serializations(&grid)[0], grid.serialize());
    }

    #[test]
    fn test_empty_grid_images_collapse() {
        let grid = Grid::new(3).unwrap();
        let images: HashSet<_> = equivalent_serializations(&grid).into_iter().collect();
        assert_eq!(images.len(), 1);
    }

    #[test]
    fn test_images_are_closed_under_the_group() {
        let grid = counting_grid();
        let images: HashSet<_> = equivalent_serializations(&grid).into_iter().collect();
        for symmetry in Symmetry::all() {
            let moved = symmetry.apply(&grid);
            let moved_images: HashSet<_> =
                equivalent_serializations(&moved).into_iter().collect();
            assert_eq!(images, moved_images, "not closed under {symmetry}");
        }
    }
}
