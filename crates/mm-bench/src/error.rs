use mm_matrix::MatrixError;
use mm_strategy::StrategyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
    #[error("strategy error: {0}")]
    Strategy(StrategyError),
}

// Matrix errors surface as `Matrix` whichever crate raised them.
impl From<StrategyError> for BenchError {
    fn from(e: StrategyError) -> Self {
        match e {
            StrategyError::Matrix(inner) => BenchError::Matrix(inner),
            other => BenchError::Strategy(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_matrix_error_flattened() {
        let err = BenchError::from(StrategyError::Matrix(MatrixError::ReferenceFrozen));
        assert!(matches!(err, BenchError::Matrix(MatrixError::ReferenceFrozen)));
    }

    #[test]
    fn test_other_strategy_errors_kept() {
        let err = BenchError::from(StrategyError::Aborted);
        assert!(matches!(err, BenchError::Strategy(StrategyError::Aborted)));

        let err = BenchError::from(StrategyError::InvalidGranularity(Some(0)));
        assert!(matches!(
            err,
            BenchError::Strategy(StrategyError::InvalidGranularity(Some(0)))
        ));
    }
}
