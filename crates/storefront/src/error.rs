use crate::schema::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid product: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Storage(String),

    #[error("Failed to upload image: {0}")]
    Upload(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin login required")]
    Unauthorized,

    #[error("Config error: {0}")]
    Config(String),
}

impl StoreError {
    /// Violations carried by a validation failure, empty for every other error.
    pub fn violations(&self) -> &[Violation] {
        match self {
            StoreError::Validation(v) => v,
            _ => &[],
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, StoreError>;
