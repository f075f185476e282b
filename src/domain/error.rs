// Domain errors
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimatorError {
    #[error("Invalid argument: {field} = {value}")]
    InvalidArgument { field: &'static str, value: String },
}

impl EstimatorError {
    pub fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidArgument {
            field,
            value: value.to_string(),
        }
    }
}
