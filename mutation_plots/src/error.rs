//! Errors raised while turning a mutation table into a chart.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// A record with an empty gene symbol or a negative sample count.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The same gene symbol appears more than once in one table.
    #[error("duplicate gene symbol: {0}")]
    DuplicateGene(String),
}

pub type ChartResult<T> = std::result::Result<T, ChartError>;
