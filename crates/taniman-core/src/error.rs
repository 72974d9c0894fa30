use thiserror::Error;

#[derive(Debug, Error)]
pub enum TanimanError {
    /// Blank or malformed user input. Handled locally with an inline,
    /// already-localized message; the session state is left untouched.
    #[error("{0}")]
    Validation(String),

    /// An event arrived that the current stage does not accept, e.g. a
    /// button from a previous render. Safe to ignore.
    #[error("event '{event}' is not valid in stage '{stage}'")]
    StaleEvent { stage: String, event: String },

    /// A content-generation call failed. The conversation stays in the
    /// pre-call stage so the same action can be retried.
    #[error("collaborator call failed: {0}")]
    Collaborator(String),

    /// Writing a feedback record failed. Scoped to the submission; the
    /// conversation is unaffected.
    #[error("feedback store error: {0}")]
    Persistence(String),

    #[error("invalid month {0}: must be 1-12")]
    InvalidMonth(u32),

    #[error("unknown value: {0}")]
    UnknownValue(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TanimanError>;
