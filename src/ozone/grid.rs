//! Bordered grid storage.
//!
//! Cells live in a dense row-major buffer of `(rows + 2) * (cols + 2)` slots.
//! The outer ring is a sentinel frame that always reads `NoHole`, so the
//! eight neighbor reads of any interior cell stay inside the buffer without
//! bounds checks. Public coordinates are 0-based interior positions; the
//! padded slot of `(row, col)` is `(row + 1) * stride + (col + 1)`.

use std::fmt;

use super::error::{OzoneError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    NoHole = 0,
    Hole = 1,
}

impl Cell {
    #[inline]
    pub fn is_hole(self) -> bool {
        self == Cell::Hole
    }

    /// Digit used by the printer: 1 for a hole, 0 otherwise.
    #[inline]
    pub fn digit(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(hole: bool) -> Self {
        if hole { Cell::Hole } else { Cell::NoHole }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// Slot count of a framed `rows x cols` grid, or `None` if it cannot be
/// allocated.
pub(crate) fn framed_len(rows: usize, cols: usize) -> Option<usize> {
    let len = rows.checked_add(2)?.checked_mul(cols.checked_add(2)?)?;
    (len <= isize::MAX as usize).then_some(len)
}

impl Grid {
    /// An all-`NoHole` grid with an `rows x cols` interior.
    ///
    /// Callers must have checked the shape with [`framed_len`].
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::NoHole; (rows + 2) * (cols + 2)],
        }
    }

    /// An all-`NoHole` grid, or `InvalidConfig` if the framed buffer would
    /// overflow.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        match framed_len(rows, cols) {
            Some(_) => Ok(Self::new(rows, cols)),
            None => Err(OzoneError::InvalidConfig(format!(
                "a {rows}x{cols} grid is too large"
            ))),
        }
    }

    /// Build a grid from interior hole coordinates.
    pub fn with_holes<I>(rows: usize, cols: usize, holes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::try_new(rows, cols)?;
        for (row, col) in holes {
            grid.set(row, col, Cell::Hole)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.cols + 2
    }

    #[inline(always)]
    pub(crate) fn slot(&self, row: usize, col: usize) -> usize {
        (row + 1) * self.stride() + (col + 1)
    }

    #[inline(always)]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if row < self.rows && col < self.cols {
            Ok(())
        } else {
            Err(OzoneError::OutOfRange {
                row: row as i64,
                col: col as i64,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub(crate) fn ensure_same_shape(&self, other: &Grid) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(OzoneError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        self.check(row, col)?;
        Ok(self.cells[self.slot(row, col)])
    }

    /// Write an interior cell. The sentinel frame is unreachable from here.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        self.check(row, col)?;
        let slot = self.slot(row, col);
        self.cells[slot] = cell;
        Ok(())
    }

    #[inline]
    pub fn is_hole(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.slot(row, col)].is_hole()
    }

    /// Number of holes among the 8 neighbors of an interior cell.
    ///
    /// Edge and corner cells read the sentinel frame for their outside
    /// neighbors, so no coordinate is ever bounds-checked per neighbor.
    pub fn count_hole_neighbors(&self, row: usize, col: usize) -> Result<u8> {
        self.check(row, col)?;
        Ok(count_around(&self.cells, self.slot(row, col), self.stride()))
    }

    /// Reset every interior cell to `NoHole`.
    pub fn clear(&mut self) {
        // The frame is already NoHole, so a full fill keeps the invariant.
        self.cells.fill(Cell::NoHole);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_hole()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_hole())
    }

    /// Visit interior holes in row-major order.
    pub fn for_each_hole<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (row, line) in self.interior_rows().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.is_hole() {
                    f(row, col);
                }
            }
        }
    }

    /// `(min_row, min_col, max_row, max_col)` of all holes.
    pub fn bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut min_row = usize::MAX;
        let mut min_col = usize::MAX;
        let mut max_row = 0;
        let mut max_col = 0;
        let mut seen = false;

        self.for_each_hole(|row, col| {
            seen = true;
            min_row = min_row.min(row);
            min_col = min_col.min(col);
            max_row = max_row.max(row);
            max_col = max_col.max(col);
        });

        seen.then_some((min_row, min_col, max_row, max_col))
    }

    /// Interior rows as slices, top to bottom, without the frame.
    pub fn interior_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let stride = self.stride();
        (1..=self.rows).map(move |r| &self.cells[r * stride + 1..r * stride + 1 + self.cols])
    }

    /// Interior equality, row-major, stopping at the first differing cell.
    pub fn interior_eq(&self, other: &Grid) -> Result<bool> {
        self.ensure_same_shape(other)?;
        Ok(self
            .interior_rows()
            .zip(other.interior_rows())
            .all(|(a, b)| a == b))
    }

    #[cfg(test)]
    pub(crate) fn frame_is_clear(&self) -> bool {
        let stride = self.stride();
        let last = self.rows + 1;
        (0..stride).all(|c| !self.cells[c].is_hole() && !self.cells[last * stride + c].is_hole())
            && (0..=last).all(|r| {
                !self.cells[r * stride].is_hole() && !self.cells[r * stride + stride - 1].is_hole()
            })
    }
}

/// Compare the interior regions of two grids of the same shape.
pub fn grids_equal(a: &Grid, b: &Grid) -> Result<bool> {
    a.interior_eq(b)
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.interior_eq(other).unwrap_or(false)
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.interior_rows() {
            for (col, cell) in line.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.digit())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Hole count around padded slot `idx` in a buffer with row length `stride`.
///
/// `idx` must be an interior slot; the frame guarantees all eight reads are
/// in bounds.
#[inline(always)]
pub(crate) fn count_around(cells: &[Cell], idx: usize, stride: usize) -> u8 {
    let above = idx - stride;
    let below = idx + stride;
    cells[above - 1] as u8
        + cells[above] as u8
        + cells[above + 1] as u8
        + cells[idx - 1] as u8
        + cells[idx + 1] as u8
        + cells[below - 1] as u8
        + cells[below] as u8
        + cells[below + 1] as u8
}

#[cfg(test)]
mod tests {
    use super::{Cell, Grid, grids_equal};
    use crate::ozone::OzoneError;

    #[test]
    fn new_grid_is_empty_with_clear_frame() {
        let grid = Grid::new(15, 15);
        assert!(grid.is_empty());
        assert_eq!(grid.population(), 0);
        assert!(grid.frame_is_clear());
        assert_eq!(grid.bounds(), None);
    }

    #[test]
    fn oversized_shapes_are_rejected() {
        assert!(matches!(
            Grid::try_new(usize::MAX, 3),
            Err(OzoneError::InvalidConfig(_))
        ));
        assert!(Grid::try_new(3, usize::MAX - 1).is_err());
        assert!(Grid::with_holes(usize::MAX / 2, 4, [(0, 0)]).is_err());
        assert_eq!(Grid::try_new(15, 15).unwrap().shape(), (15, 15));
    }

    #[test]
    fn clear_empties_the_interior_and_keeps_the_frame() {
        let mut grid = Grid::with_holes(4, 5, [(0, 0), (1, 4), (3, 2)]).unwrap();
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.shape(), (4, 5));
        assert!(grid.frame_is_clear());

        grid.set(3, 4, Cell::Hole).unwrap();
        assert_eq!(grid.count_hole_neighbors(2, 3).unwrap(), 1);
    }

    #[test]
    fn set_rejects_coordinates_in_the_frame() {
        let mut grid = Grid::new(3, 4);
        assert!(matches!(
            grid.set(3, 0, Cell::Hole),
            Err(OzoneError::OutOfRange { row: 3, col: 0, rows: 3, cols: 4 })
        ));
        assert!(matches!(
            grid.set(0, 4, Cell::Hole),
            Err(OzoneError::OutOfRange { .. })
        ));
        assert!(grid.frame_is_clear());
    }

    #[test]
    fn corner_and_edge_neighbors_see_only_the_interior() {
        let mut grid = Grid::new(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, Cell::Hole).unwrap();
            }
        }

        for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
            assert_eq!(grid.count_hole_neighbors(row, col).unwrap(), 3);
        }
        for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert_eq!(grid.count_hole_neighbors(row, col).unwrap(), 5);
        }
        assert_eq!(grid.count_hole_neighbors(1, 1).unwrap(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::with_holes(1, 1, [(0, 0)]).unwrap();
        assert_eq!(grid.count_hole_neighbors(0, 0).unwrap(), 0);
    }

    #[test]
    fn bounds_and_iteration_follow_row_major_order() {
        let grid = Grid::with_holes(5, 6, [(3, 1), (0, 4), (3, 5)]).unwrap();
        let mut seen = Vec::new();
        grid.for_each_hole(|r, c| seen.push((r, c)));
        assert_eq!(seen, vec![(0, 4), (3, 1), (3, 5)]);
        assert_eq!(grid.bounds(), Some((0, 1, 3, 5)));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn equality_is_reflexive_symmetric_and_shape_checked() {
        let a = Grid::with_holes(4, 4, [(1, 1), (2, 3)]).unwrap();
        let b = Grid::with_holes(4, 4, [(1, 1)]).unwrap();
        assert!(grids_equal(&a, &a).unwrap());
        assert_eq!(grids_equal(&a, &b).unwrap(), grids_equal(&b, &a).unwrap());
        assert!(!grids_equal(&a, &b).unwrap());

        let other = Grid::new(4, 5);
        assert!(matches!(
            grids_equal(&a, &other),
            Err(OzoneError::ShapeMismatch { left: (4, 4), right: (4, 5) })
        ));
        assert_ne!(a, other);
    }

    #[test]
    fn display_renders_interior_only() {
        let grid = Grid::with_holes(2, 3, [(0, 1), (1, 2)]).unwrap();
        assert_eq!(grid.to_string(), "0 1 0\n0 0 1\n");
    }
}
