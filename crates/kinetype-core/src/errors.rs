use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinetypeError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid range token: {0}")]
    InvalidRange(String),
}
