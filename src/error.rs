use thiserror::Error;

/// Unified error type for bump-release operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Invalid bump request: {0}")]
    Request(String),

    #[error("Command `{command}` failed with exit code {code}: {stderr}")]
    Command {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bump-release
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create an invalid-request error with context
    pub fn request(msg: impl Into<String>) -> Self {
        BumpError::Request(msg.into())
    }

    /// Create an external-command failure from a command line and its output
    pub fn command(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        BumpError::Command {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }
}
