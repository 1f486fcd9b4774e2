use thiserror::Error;

use crate::matrix::MatrixError;
use crate::stock::StockError;

#[derive(Error, Debug)]
pub enum CutError {
    #[error("invalid bar stock: {0}")]
    Stock(#[from] StockError),

    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reporter thread panicked: {0}")]
    ReporterPanicked(String),
}
