use thiserror::Error;

use crate::record::Solutions;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("cannot transpose a matrix with no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Returns the waste of every solution, in the set's iteration order.
pub fn waste_column(solutions: &Solutions) -> Vec<u64> {
    solutions.iter().map(|r| r.waste).collect()
}

/// Returns the response matrix: one row per solution holding its combination vector only.
pub fn response_matrix(solutions: &Solutions) -> Vec<Vec<u64>> {
    solutions.iter().map(|r| r.counts.clone()).collect()
}

/// Transposes a rectangular matrix, so that `output[j][i] == matrix[i][j]`.
/// Fails on a matrix without rows or with rows of different lengths.
pub fn transpose<T: Clone>(matrix: &[Vec<T>]) -> Result<Vec<Vec<T>>, MatrixError> {
    let columns = match matrix.first() {
        Some(first) => first.len(),
        None => return Err(MatrixError::Empty),
    };
    if let Some((row, r)) = matrix.iter().enumerate().find(|(_, r)| r.len() != columns) {
        return Err(MatrixError::Ragged {
            row,
            expected: columns,
            found: r.len(),
        });
    }

    let transposed: Vec<Vec<T>> = (0..columns)
        .map(|j| matrix.iter().map(|row| row[j].clone()).collect())
        .collect();
    Ok(transposed)
}
