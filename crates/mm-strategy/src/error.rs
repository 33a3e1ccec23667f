use mm_matrix::MatrixError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("invalid partition granularity {0:?}: parallel strategies need a value >= 1")]
    InvalidGranularity(Option<usize>),
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
    #[error("run aborted")]
    Aborted,
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
}

pub type Result<T> = std::result::Result<T, StrategyError>;
