use thiserror::Error;

/// Raised when a value pool the generator samples from cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("value pool '{pool}' is empty")]
    EmptyPool { pool: &'static str },
    #[error("value pool '{pool}' has an entry that cannot live in a CSV cell: {value:?}")]
    InvalidEntry { pool: &'static str, value: String },
}
