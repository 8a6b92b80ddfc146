use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("{failed} of {total} output(s) could not be written")]
    OutputsFailed { failed: usize, total: usize },

    #[error("{errors} image(s) failed during batch processing")]
    BatchFailed { errors: usize },

    #[error(transparent)]
    Library(#[from] iconfit::Error),
}
