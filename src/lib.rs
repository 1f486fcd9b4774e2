//! Enumeration of the maximal ways to cut standard bar lengths within a length limit.
//!
//! A combination counts how many bars of each standard length are used. It is maximal
//! (terminal) when no further bar fits under the limit. Every maximal combination is
//! recorded once with its total length and waste, then reshaped into a response matrix
//! (one row per combination) and its transpose, the coefficient matrix.
//!
//! Two search modes produce the same solution set:
//! - `SearchMode::Exhaustive` tries every bar at every step, so a vector is reached once
//!   per addition order. Only the first discovery of a terminal vector is reported.
//! - `SearchMode::Canonical` adds bars in non-decreasing index order and visits each
//!   vector once.

pub mod combinations;
pub mod cutter;
pub mod error;
pub mod matrix;
pub mod record;
pub mod report;
pub mod search;
pub mod stock;

// Re-export commonly used types
pub use cutter::{BarCutter, CutOutcome};
pub use error::CutError;
pub use record::{SolutionRecord, Solutions};
pub use search::{SearchMode, SearchStats, find_combinations};
pub use stock::BarStock;
