//! Row-major 2D grids: the normalized noise field and the classified output.

use hashbrown::HashMap;
use std::hash::Hash;

/// An immutable `width x height` grid stored row-major.
///
/// Cells are addressed as `(x, y)` with `x` in `[0, width)` and `y` in
/// `[0, height)`. The only way to obtain a grid is from the generator or the
/// classifier, so a grid never changes after it is returned.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

/// Normalized fractal noise, one `f64` in `[0, 1]` per cell.
pub type NoiseField = Grid<f64>;

/// One category per cell; the output of [`TerrainClassifier`](crate::TerrainClassifier).
pub type ClassifiedGrid<C> = Grid<C>;

impl<T> Grid<T> {
    /// Wraps a row-major cell vector. `cells.len()` must equal `width * height`.
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for grids produced by this crate (dimensions are at least 1x1).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y))
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Row `y` as a slice, empty when `y` is out of bounds.
    pub fn row(&self, y: u32) -> &[T] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Iterates over all rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, T> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Consumes the grid and returns the row-major cells.
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl NoiseField {
    /// Smallest and largest cell value.
    pub fn value_range(&self) -> (f64, f64) {
        self.cells
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

impl<C: Copy + Eq + Hash> Grid<C> {
    /// Number of cells assigned to each category.
    pub fn coverage(&self) -> HashMap<C, usize> {
        let mut counts = HashMap::new();
        for &category in &self.cells {
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }
}
