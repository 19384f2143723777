//! Vintage analysis for consumer-credit portfolios.
//!
//! Given per-account monthly overdue observations and each account's
//! origination ("book") month, the pipeline tracks cumulative "ever-bad"
//! delinquency as a function of account age, aggregated by origination
//! cohort: merge → temporal normalization → per-account ever-bad latch →
//! cohort × vintage pivot (with forward fill) → quarterly cohort
//! aggregation and summary statistics.

pub mod analyzer;
pub mod error;
pub mod everbad;
pub mod loader;
pub mod merge;
pub mod pivot;
pub mod quarterly;
pub mod summary;
pub mod types;

pub use analyzer::VintageAnalyzer;
pub use error::VintageError;
pub use pivot::VintageMatrix;
pub use quarterly::PerformanceSeries;
pub use types::*;

/// Standard result type for all vintage-analysis operations.
pub type VintageResult<T> = Result<T, VintageError>;
