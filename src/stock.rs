use std::fmt;

use thiserror::Error;

/// Errors raised while building a `BarStock`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StockError {
    /// A bar of length zero can always be added, so the search would never terminate.
    #[error("bar length at position {index} is zero, every bar length must be positive")]
    ZeroLength { index: usize },
}

/// The standard bar lengths available for cutting and the limit a combination may not exceed.
/// Index order of `lengths` is the index order of every combination vector built from this stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarStock {
    lengths: Vec<u64>,
    limit: u64,
}

impl BarStock {
    /// Constructor. An empty length list or a zero limit is accepted and simply yields no solutions.
    pub fn new(lengths: Vec<u64>, limit: u64) -> Result<Self, StockError> {
        if let Some(index) = lengths.iter().position(|&l| l == 0) {
            return Err(StockError::ZeroLength { index });
        }
        Ok(Self { lengths, limit })
    }

    /// Returns the bar lengths, in index order.
    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Returns the limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the number of distinct bar lengths (the width of a combination vector).
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Returns the shortest bar length, if any.
    pub fn min_length(&self) -> Option<u64> {
        self.lengths.iter().copied().min()
    }

    /// Upper bound of the recursion depth: how many of the shortest bar fit in the limit.
    pub fn max_depth(&self) -> u64 {
        self.min_length().map_or(0, |m| self.limit / m)
    }

    /// Returns true if at least one bar can be added on top of `total` without exceeding the limit.
    #[inline(always)]
    pub fn can_extend(&self, total: u64) -> bool {
        self.lengths
            .iter()
            .any(|&l| total.saturating_add(l) <= self.limit)
    }
}

impl fmt::Display for BarStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} <= {}", self.lengths, self.limit)
    }
}
