#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error: malformed option definition '{0}'")]
    MalformedOption(String),

    #[error("error: unknown option '{0}'")]
    UnknownOption(String),

    #[error("error: option '{flags}' argument missing")]
    MissingArgument { flags: String },

    #[error("error: option '{flags}' argument '{value}' is invalid: {reason}")]
    InvalidArgument {
        flags: String,
        value: String,
        reason: String,
    },

    #[error("option not found: {0}")]
    NotFound(String),

    #[error("type mismatch for '{name}': expected {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit status for errors that reach the command line.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
