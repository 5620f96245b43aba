//! Label grid produced by labeling a map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character used when rendering a cell that has no label.
pub const UNSET_LABEL: char = '-';

/// Square grid of per-neuron class labels, row-major.
///
/// A cell is `None` when no labeling pass has assigned it a label, which
/// happens only when the map was labeled with an empty dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelGrid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl LabelGrid {
    /// Creates a grid with every cell unset.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a grid from row-major cells.
    ///
    /// Returns `None` if `cells` does not hold `size * size` entries.
    pub fn from_cells(size: usize, cells: Vec<Option<char>>) -> Option<Self> {
        (cells.len() == size * size).then_some(Self { size, cells })
    }

    /// Grid side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Label at `(row, col)`; `None` if unset or out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col]
        } else {
            None
        }
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Option<char>] {
        &self.cells
    }

    /// Iterates `(row, col, label)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<char>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &label)| (i / self.size, i % self.size, label))
    }

    /// Number of cells carrying `label`.
    pub fn count(&self, label: char) -> usize {
        self.cells.iter().filter(|&&c| c == Some(label)).count()
    }

    /// Number of unset cells.
    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Distinct labels present, sorted.
    pub fn distinct_labels(&self) -> Vec<char> {
        let mut labels: Vec<char> = self.cells.iter().flatten().copied().collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }
}

impl fmt::Display for LabelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row.iter().map(|c| c.unwrap_or(UNSET_LABEL)).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
