use thiserror::Error;

/// Failure modes of one analysis submission. The `Display` text is what the
/// session stores and the UI shows; server-side error detail is logged but
/// not surfaced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Analysis failed. Please try again.")]
    AnalysisFailed,
    #[error("Network error: {0}")]
    Network(String),
    #[error("The server returned a response that could not be read.")]
    MalformedResponse,
    #[error("The analysis request timed out.")]
    Timeout,
}
