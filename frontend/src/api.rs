use crate::error::AnalysisError;
use futures::future::{self, Either};
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use shared::AnalysisResponse;

pub const PREDICT_ENDPOINT: &str = "/predict";

/// A submission that has not completed within this window fails with
/// `AnalysisError::Timeout` instead of leaving the session stuck submitting.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// Posts one image plus the prompt string to the prediction endpoint.
///
/// The multipart fields are `file` (raw image bytes) and `texts` (the prompt
/// string exactly as typed; the server handles comma-splitting).
pub async fn submit_analysis(
    file: &GlooFile,
    prompts: &str,
) -> Result<AnalysisResponse, AnalysisError> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| AnalysisError::Network("failed to build form data".to_string()))?;
    form_data
        .append_with_blob("file", file.as_ref())
        .map_err(|_| AnalysisError::Network("failed to attach image".to_string()))?;
    form_data
        .append_with_str("texts", prompts)
        .map_err(|_| AnalysisError::Network("failed to attach prompts".to_string()))?;

    let request = Request::post(PREDICT_ENDPOINT)
        .body(form_data)
        .map_err(|e| AnalysisError::Network(e.to_string()))?;

    let send = request.send();
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    futures::pin_mut!(send, timeout);

    let response = match future::select(send, timeout).await {
        Either::Left((result, _)) => result.map_err(|e| AnalysisError::Network(e.to_string()))?,
        Either::Right(_) => {
            log::error!("Prediction request timed out after {}ms", REQUEST_TIMEOUT_MS);
            return Err(AnalysisError::Timeout);
        }
    };

    if !response.ok() {
        let status = response.status();
        let detail = response.text().await.unwrap_or_default();
        log::error!("Prediction endpoint returned {}: {}", status, detail);
        return Err(AnalysisError::AnalysisFailed);
    }

    response.json::<AnalysisResponse>().await.map_err(|e| {
        log::error!("Failed to parse prediction response: {}", e);
        AnalysisError::MalformedResponse
    })
}
