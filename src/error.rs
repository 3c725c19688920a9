use std::error::Error;
use std::fmt;
use polars::error::PolarsError;

#[derive(Debug)]
pub enum PredictorError {
    DataLoading(PolarsError),
    InvalidState(String),
    InvalidInput(String),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataLoading(e) => write!(f, "Data loading error: {}", e),
            Self::InvalidState(msg) => write!(f, "Invalid state error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input error: {}", msg),
        }
    }
}

impl Error for PredictorError {}

impl From<PolarsError> for PredictorError {
    fn from(err: PolarsError) -> Self {
        Self::DataLoading(err)
    }
}
