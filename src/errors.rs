use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(String),
    /// Failed to parse input content
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Invalid input format or configuration value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Archive could not be opened or read
    #[error("Archive error: {0}")]
    ZipError(String),
    /// Source path has an extension we don't know how to read
    #[error("Unknown input file type '{0}', please use the original .pib or .csm backup file")]
    UnknownExtension(String),
    /// Archive holds no messages table
    #[error("Couldn't find messages file in '{0}'. Please check your input path and contents")]
    MissingMessagesFile(String),
    /// Backup was exported in binary mode
    #[error("Couldn't load binary messages file '{path}'. {remedy}")]
    BinaryExport { path: String, remedy: String },
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::ZipError(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

// Custom type alias for Results in this application
pub type AppResult<T> = Result<T, AppError>;
