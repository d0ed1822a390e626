//! Per-request results delivered by a batch dispatch.

/// Result of one dispatched request.
///
/// Transport failures are caught at the request boundary and recorded here as
/// [`Outcome::Failure`] rather than propagated, so one refused connection
/// never takes down its siblings. A response with a non-success status code is
/// still an [`Outcome::Success`]: the request was delivered and answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request completed with a response.
    Success {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, buffered in full.
        body: String,
    },
    /// The request never produced a response.
    Failure {
        /// Human-readable description of what went wrong.
        error: String,
    },
}

impl Outcome {
    /// Status code of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Outcome::Success { status, .. } => Some(*status),
            Outcome::Failure { .. } => None,
        }
    }

    /// Whether a response was received at all.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// The payload to print for this outcome: the response body on success,
    /// the error description on failure.
    pub fn payload(&self) -> &str {
        match self {
            Outcome::Success { body, .. } => body,
            Outcome::Failure { error } => error,
        }
    }

    /// One-line summary for the outcome at dispatch position `index`.
    ///
    /// Positions are reported 1-based. Failures get their own wording instead
    /// of a status line, since there is no status to report.
    pub fn summary_line(&self, index: usize) -> String {
        match self {
            Outcome::Success { status, .. } => {
                format!("Request {} status: {}", index + 1, status)
            }
            Outcome::Failure { error } => {
                format!("Request {} failed: {}", index + 1, error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_summary_reports_position_and_status() {
        let outcome = Outcome::Success {
            status: 200,
            body: "{}".to_string(),
        };
        assert_eq!(outcome.summary_line(0), "Request 1 status: 200");
        assert_eq!(outcome.summary_line(2), "Request 3 status: 200");
    }

    #[test]
    fn test_failure_summary_reports_error() {
        let outcome = Outcome::Failure {
            error: "connection refused".to_string(),
        };
        assert_eq!(outcome.summary_line(0), "Request 1 failed: connection refused");
    }

    #[test]
    fn test_payload_for_success_and_failure() {
        let success = Outcome::Success {
            status: 200,
            body: "{\"namespaces\":[]}".to_string(),
        };
        let failure = Outcome::Failure {
            error: "connection refused".to_string(),
        };
        assert_eq!(success.payload(), "{\"namespaces\":[]}");
        assert_eq!(failure.payload(), "connection refused");
    }

    #[test]
    fn test_status_only_present_on_success() {
        let success = Outcome::Success {
            status: 404,
            body: "not found".to_string(),
        };
        let failure = Outcome::Failure {
            error: "timed out".to_string(),
        };
        assert_eq!(success.status(), Some(404));
        assert!(success.is_success());
        assert_eq!(failure.status(), None);
        assert!(!failure.is_success());
    }
}
