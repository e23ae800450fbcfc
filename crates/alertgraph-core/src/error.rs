use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0} required")]
    MissingParameter(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Alert not found: {0}")]
    AlertNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, AlertGraphError>;
