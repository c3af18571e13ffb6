use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input list not found: {path}")]
    InputNotFound { path: String },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Markdown converter unavailable: {message}")]
    ConverterUnavailable { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for BatchError {
    fn user_message(&self) -> String {
        match self {
            BatchError::InputNotFound { path } => {
                format!("Input list not found: {}", path)
            }
            BatchError::InvalidJson { path, message } => {
                format!("Could not parse {} as a JSON array of paths: {}", path, message)
            }
            BatchError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            BatchError::ConverterUnavailable { message } => {
                format!("The Markdown converter could not be initialized: {}", message)
            }
            BatchError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            BatchError::InputNotFound { .. } => Some(
                "Both arguments must name existing JSON files, each containing an array of absolute path strings.".to_string()
            ),
            BatchError::InvalidJson { .. } => Some(
                r#"Each input file must contain a JSON array of strings, e.g. ["/home/user/report.docx"]."#.to_string()
            ),
            BatchError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string()
            ),
            BatchError::ConverterUnavailable { .. } => Some(
                "This is a build or installation problem; reinstall mdbatch and try again.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(error: toml::de::Error) -> Self {
        BatchError::Config {
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for BatchError {
    fn from(error: walkdir::Error) -> Self {
        BatchError::Io(error.into())
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;
