use thiserror::Error;

/// Fatal error categories. Source and classifier failures never surface
/// through this type; they degrade in place and the run continues.
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Unusable configuration detected at startup: bad threshold, inverted
    /// cutoffs, missing label mapping. Not recoverable per item.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request itself cannot be screened, e.g. no name and no keywords.
    #[error("invalid input: {0}")]
    Input(String),
}
