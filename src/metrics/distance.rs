use crate::WerError;
use log::debug;

/// Minimum-edit-distance table over two word sequences.
///
/// Row `i` corresponds to the first `i` reference words, column `j` to the first
/// `j` hypothesis words. Stored row-major in a single owned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl DistanceTable {
    /// Build the full table for `reference` against `hypothesis`.
    ///
    /// Unlike [`compute`], an empty reference is allowed here.
    pub fn build<R, H>(reference: &[R], hypothesis: &[H]) -> Self
    where
        R: AsRef<str>,
        H: AsRef<str>,
    {
        let rows = reference.len() + 1;
        let cols = hypothesis.len() + 1;
        let mut table = Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        };

        for j in 0..cols {
            table.set(0, j, j);
        }
        for i in 0..rows {
            table.set(i, 0, i);
        }

        for i in 1..rows {
            for j in 1..cols {
                let value = if reference[i - 1].as_ref() == hypothesis[j - 1].as_ref() {
                    table.at(i - 1, j - 1)
                } else {
                    let substitution = table.at(i - 1, j - 1);
                    let insertion = table.at(i, j - 1);
                    let deletion = table.at(i - 1, j);
                    1 + substitution.min(insertion).min(deletion)
                };
                table.set(i, j, value);
            }
        }

        table
    }

    /// Build a table from raw rows. Every row must have the same length.
    ///
    /// Mostly useful for feeding hand-made (possibly inconsistent) tables to the renderer.
    pub fn from_rows(rows: Vec<Vec<usize>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell `(i, j)`, or `None` when out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    /// Edit distance between the full sequences (bottom-right cell).
    pub fn distance(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }

    /// Same table with reference and hypothesis axes swapped.
    pub fn transposed(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                cells.push(self.at(i, j));
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    fn at(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }
}

/// WER as a percentage of the reference length. Can exceed 100.
pub fn word_error_rate(distance: usize, reference_len: usize) -> Result<f64, WerError> {
    if reference_len == 0 {
        return Err(WerError::EmptyReference);
    }
    Ok(distance as f64 / reference_len as f64 * 100.0)
}

/// Compute WER and the distance table for `reference` against `hypothesis`.
pub fn compute<R, H>(reference: &[R], hypothesis: &[H]) -> Result<(f64, DistanceTable), WerError>
where
    R: AsRef<str>,
    H: AsRef<str>,
{
    if reference.is_empty() {
        return Err(WerError::EmptyReference);
    }

    let table = DistanceTable::build(reference, hypothesis);
    let wer = word_error_rate(table.distance(), reference.len())?;

    debug!(
        "distance table {}x{}: distance={} wer={:.2}",
        table.rows(),
        table.cols(),
        table.distance(),
        wer
    );

    Ok((wer, table))
}
