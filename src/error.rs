use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    #[error("decode called before set_code")]
    NoCodeSet,
    #[error("syndrome has length {actual}, code expects {expected}")]
    SyndromeShapeMismatch { expected: usize, actual: usize },
    #[error("inner decoder could not clear the residual syndrome")]
    InfeasibleEstimate,
}
