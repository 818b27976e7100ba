use thiserror::Error;

/// Everything that can go wrong between receiving an analysis request and
/// returning a report. All of these surface to the caller verbatim as the
/// `{ "error": ... }` response body.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Unknown analysis type: {0}")]
    UnknownAnalysisKind(String),

    #[error("Task data is missing")]
    MissingTaskData,

    #[error("Project and user data is missing")]
    MissingAggregateData,

    /// Transport failure or a non-success status from the model API. Carries
    /// the upstream status and body so the caller can see what happened.
    #[error("Model request failed: {0}")]
    ModelUnavailable(String),

    #[error("Model response contained no candidates")]
    EmptyModelResponse,

    #[error("Failed to parse model response: {0}")]
    ModelDecode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        AnalysisError::ModelUnavailable(error.to_string())
    }
}
