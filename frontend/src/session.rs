use crate::error::AnalysisError;
use shared::{AnalysisResponse, Prediction};

/// Where one upload-analyze-review cycle currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Ready,
    Submitting,
    Success,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Ready => "ready",
            SessionStatus::Submitting => "submitting",
            SessionStatus::Success => "success",
            SessionStatus::Failed => "failed",
        }
    }
}

/// Handle for one issued submission. Carries the sequence number that
/// [`AnalysisSession::complete`] checks to discard stale responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    seq: u64,
}

/// Client-side state for one upload-analyze-review cycle.
///
/// Generic over the input-image handle `I` so the state machine stays free of
/// browser types: the component instantiates it with a file + object-URL pair,
/// tests with a plain placeholder. The session never performs I/O itself; the
/// caller obtains a [`SubmitTicket`], runs the request, and feeds the outcome
/// back through [`complete`](Self::complete).
pub struct AnalysisSession<I> {
    input: Option<I>,
    prompts: String,
    predictions: Vec<Prediction>,
    annotated_image: Option<String>,
    error: Option<String>,
    analyzed: bool,
    in_flight: bool,
    latest_seq: u64,
}

impl<I> Default for AnalysisSession<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> AnalysisSession<I> {
    pub fn new() -> Self {
        Self {
            input: None,
            prompts: String::new(),
            predictions: Vec::new(),
            annotated_image: None,
            error: None,
            analyzed: false,
            in_flight: false,
            latest_seq: 0,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.in_flight {
            SessionStatus::Submitting
        } else if self.error.is_some() {
            SessionStatus::Failed
        } else if self.analyzed {
            SessionStatus::Success
        } else if self.input.is_some() {
            SessionStatus::Ready
        } else {
            SessionStatus::Idle
        }
    }

    pub fn input(&self) -> Option<&I> {
        self.input.as_ref()
    }

    pub fn prompts(&self) -> &str {
        &self.prompts
    }

    /// Predictions from the most recent successful submission, in server order.
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Server-annotated copy of the upload, when the endpoint returned one.
    /// Takes precedence over the raw input as the preview source.
    pub fn annotated_image(&self) -> Option<&str> {
        self.annotated_image.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True once a submission has succeeded for the current input, even with
    /// zero predictions. Lets the UI tell "nothing found" from "not analyzed".
    pub fn has_analyzed(&self) -> bool {
        self.analyzed
    }

    /// Replaces the input wholesale and clears everything derived from the
    /// previous one. Any in-flight submission is invalidated; its response
    /// will be discarded on arrival. Dropping the old `I` releases its
    /// preview resource.
    pub fn select_input(&mut self, input: I) {
        self.input = Some(input);
        self.predictions.clear();
        self.annotated_image = None;
        self.error = None;
        self.analyzed = false;
        self.in_flight = false;
        self.latest_seq += 1;
    }

    pub fn set_prompts(&mut self, text: impl Into<String>) {
        self.prompts = text.into();
    }

    /// Starts a submission. Returns `None` when no input is selected, in
    /// which case nothing changes and no request must be issued.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.input.is_none() {
            return None;
        }
        self.latest_seq += 1;
        self.in_flight = true;
        self.error = None;
        Some(SubmitTicket {
            seq: self.latest_seq,
        })
    }

    /// Applies the outcome of the submission identified by `ticket`. Returns
    /// `false` when the ticket is stale (a newer submission or input selection
    /// superseded it) and the outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: SubmitTicket,
        outcome: Result<AnalysisResponse, AnalysisError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            log::debug!(
                "Discarding stale analysis response (seq {}, latest {})",
                ticket.seq,
                self.latest_seq
            );
            return false;
        }

        self.in_flight = false;
        match outcome {
            Ok(response) => {
                self.predictions = response.predictions;
                if let Some(image) = response.image {
                    self.annotated_image = Some(image);
                }
                self.error = None;
                self.analyzed = true;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Returns the session to Idle, dropping the input and all derived state.
    pub fn reset(&mut self) {
        self.input = None;
        self.prompts.clear();
        self.predictions.clear();
        self.annotated_image = None;
        self.error = None;
        self.analyzed = false;
        self.in_flight = false;
        self.latest_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AnalysisSession<&'static str> {
        AnalysisSession::new()
    }

    fn prediction(label: &str, score: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            score,
            bounding_box: None,
            crop: format!("{label}.png"),
        }
    }

    fn response(predictions: Vec<Prediction>) -> AnalysisResponse {
        AnalysisResponse {
            count: Some(predictions.len()),
            predictions,
            image: None,
        }
    }

    #[test]
    fn starts_idle() {
        let s = session();
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(s.input().is_none());
        assert!(s.predictions().is_empty());
        assert!(!s.has_analyzed());
    }

    #[test]
    fn selecting_input_moves_to_ready() {
        let mut s = session();
        s.select_input("farm.jpg");
        assert_eq!(s.status(), SessionStatus::Ready);
        assert_eq!(s.input(), Some(&"farm.jpg"));
    }

    #[test]
    fn reselecting_retains_only_latest_input_and_clears_results() {
        let mut s = session();
        s.select_input("first.jpg");
        let ticket = s.begin_submit().unwrap();
        assert!(s.complete(ticket, Ok(response(vec![prediction("apple", 0.92)]))));
        assert_eq!(s.predictions().len(), 1);

        s.select_input("second.jpg");
        assert_eq!(s.input(), Some(&"second.jpg"));
        assert_eq!(s.status(), SessionStatus::Ready);
        assert!(s.predictions().is_empty());
        assert!(s.error().is_none());
        assert!(!s.has_analyzed());
    }

    #[test]
    fn submit_without_input_issues_no_request() {
        let mut s = session();
        let mut issued: Vec<SubmitTicket> = Vec::new();

        if let Some(ticket) = s.begin_submit() {
            issued.push(ticket);
        }

        assert!(issued.is_empty());
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn successful_submission() {
        let mut s = session();
        s.select_input("orchard.jpg");
        s.set_prompts("apple, pest");

        let ticket = s.begin_submit().unwrap();
        assert_eq!(s.status(), SessionStatus::Submitting);

        assert!(s.complete(ticket, Ok(response(vec![prediction("apple", 0.92)]))));
        assert_eq!(s.status(), SessionStatus::Success);
        assert!(s.has_analyzed());
        assert_eq!(s.predictions().len(), 1);
        assert_eq!(s.predictions()[0].label, "apple");
        assert_eq!(s.predictions()[0].score, 0.92);
    }

    #[test]
    fn failed_submission_keeps_prior_predictions() {
        let mut s = session();
        s.select_input("orchard.jpg");

        let before = s.predictions().to_vec();
        let ticket = s.begin_submit().unwrap();
        assert!(s.complete(ticket, Err(AnalysisError::AnalysisFailed)));

        assert_eq!(s.status(), SessionStatus::Failed);
        assert!(!s.has_analyzed());
        assert!(s.error().is_some());
        assert_eq!(s.predictions(), before.as_slice());
    }

    #[test]
    fn zero_predictions_is_still_success() {
        let mut s = session();
        s.select_input("empty-field.jpg");

        let ticket = s.begin_submit().unwrap();
        assert!(s.complete(ticket, Ok(response(vec![]))));

        assert_eq!(s.status(), SessionStatus::Success);
        assert!(s.has_analyzed());
        assert!(s.predictions().is_empty());
        assert!(s.error().is_none());
    }

    #[test]
    fn resubmission_allowed_after_failure() {
        let mut s = session();
        s.select_input("orchard.jpg");

        let first = s.begin_submit().unwrap();
        s.complete(first, Err(AnalysisError::Timeout));
        assert_eq!(s.status(), SessionStatus::Failed);

        let second = s.begin_submit().unwrap();
        assert_eq!(s.status(), SessionStatus::Submitting);
        assert!(s.error().is_none());
        assert!(s.complete(second, Ok(response(vec![]))));
        assert_eq!(s.status(), SessionStatus::Success);
    }

    #[test]
    fn stale_response_discarded_when_it_arrives_last() {
        let mut s = session();
        s.select_input("first.jpg");
        let first = s.begin_submit().unwrap();

        s.select_input("second.jpg");
        let second = s.begin_submit().unwrap();

        assert!(s.complete(second, Ok(response(vec![prediction("orange", 0.81)]))));
        assert!(!s.complete(first, Ok(response(vec![prediction("apple", 0.92)]))));

        assert_eq!(s.status(), SessionStatus::Success);
        assert_eq!(s.predictions().len(), 1);
        assert_eq!(s.predictions()[0].label, "orange");
    }

    #[test]
    fn stale_response_discarded_when_it_arrives_first() {
        let mut s = session();
        s.select_input("first.jpg");
        let first = s.begin_submit().unwrap();

        s.select_input("second.jpg");
        let second = s.begin_submit().unwrap();

        assert!(!s.complete(first, Ok(response(vec![prediction("apple", 0.92)]))));
        assert_eq!(s.status(), SessionStatus::Submitting);

        assert!(s.complete(second, Ok(response(vec![prediction("orange", 0.81)]))));
        assert_eq!(s.predictions()[0].label, "orange");
    }

    #[test]
    fn stale_failure_does_not_fail_superseded_session() {
        let mut s = session();
        s.select_input("first.jpg");
        let first = s.begin_submit().unwrap();

        s.select_input("second.jpg");
        assert_eq!(s.status(), SessionStatus::Ready);

        assert!(!s.complete(first, Err(AnalysisError::Network("connection refused".into()))));
        assert_eq!(s.status(), SessionStatus::Ready);
        assert!(s.error().is_none());
    }

    #[test]
    fn annotated_image_replaces_preview_source() {
        let mut s = session();
        s.select_input("orchard.jpg");
        assert!(s.annotated_image().is_none());

        let ticket = s.begin_submit().unwrap();
        let mut body = response(vec![prediction("apple", 0.92)]);
        body.image = Some("data:image/jpeg;base64,ANNOTATED".to_string());
        s.complete(ticket, Ok(body));

        assert_eq!(s.annotated_image(), Some("data:image/jpeg;base64,ANNOTATED"));

        s.select_input("next.jpg");
        assert!(s.annotated_image().is_none());
    }

    #[test]
    fn set_prompts_is_idempotent() {
        let mut s = session();
        s.select_input("orchard.jpg");
        s.set_prompts("apple, orange");
        let status = s.status();

        s.set_prompts("apple, orange");
        s.set_prompts("apple, orange");

        assert_eq!(s.prompts(), "apple, orange");
        assert_eq!(s.status(), status);
    }

    #[test]
    fn prompts_are_stored_verbatim() {
        let mut s = session();
        s.set_prompts("  apple ,orange,  ");
        assert_eq!(s.prompts(), "  apple ,orange,  ");
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut s = session();
        s.select_input("orchard.jpg");
        s.set_prompts("apple");
        let ticket = s.begin_submit().unwrap();
        s.complete(ticket, Ok(response(vec![prediction("apple", 0.92)])));

        s.reset();
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(s.input().is_none());
        assert!(s.prompts().is_empty());
        assert!(s.predictions().is_empty());
        assert!(s.annotated_image().is_none());
        assert!(!s.has_analyzed());
    }

    #[test]
    fn reset_invalidates_in_flight_submission() {
        let mut s = session();
        s.select_input("orchard.jpg");
        let ticket = s.begin_submit().unwrap();

        s.reset();
        assert!(!s.complete(ticket, Ok(response(vec![prediction("apple", 0.92)]))));
        assert_eq!(s.status(), SessionStatus::Idle);
    }

    #[test]
    fn error_message_comes_from_the_failure() {
        let mut s = session();
        s.select_input("orchard.jpg");

        let ticket = s.begin_submit().unwrap();
        s.complete(ticket, Err(AnalysisError::Network("connection refused".into())));
        assert_eq!(s.error(), Some("Network error: connection refused"));

        let ticket = s.begin_submit().unwrap();
        s.complete(ticket, Err(AnalysisError::MalformedResponse));
        assert_eq!(
            s.error(),
            Some("The server returned a response that could not be read.")
        );
    }
}
