#[derive(Debug, thiserror::Error)]
pub enum NghError {
    #[error("{0}")]
    Options(#[from] cmdopt::Error),

    #[error("error: cannot encode options: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NghError>;

/// Fatal user-facing error: print to stderr and exit 1.
pub fn yourfault(msg: &str) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}
