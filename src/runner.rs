//! Concurrent fan-out of identical requests.
//!
//! The runner dispatches every request in a batch at the same time and, after
//! all of them are terminal, reports one [`Outcome`] per request in dispatch
//! order.

use crate::error::Result;
use crate::http::HttpClient;
use crate::outcome::Outcome;
use crate::request::RequestDescriptor;
use futures::future::join_all;
use metrics::counter;
use std::time::Instant;
use uuid::Uuid;

/// Unique identifier for a dispatched batch, used to correlate log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(pub Uuid);

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display only first 8 characters for readability in logs
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

impl From<Uuid> for BatchId {
    fn from(uuid: Uuid) -> Self {
        BatchId(uuid)
    }
}

/// Dispatches batches of identical requests through an [`HttpClient`].
///
/// Every request in a batch is spawned at once; there is no concurrency cap
/// and no ordering between dispatches. A transport failure on one request is
/// captured as [`Outcome::Failure`] and never disturbs its siblings. Only a
/// request task that dies without producing an outcome (panic or cancellation)
/// fails the batch as a whole.
pub struct FanoutRunner<H: HttpClient> {
    client: H,
}

impl<H: HttpClient + 'static> FanoutRunner<H> {
    /// Create a runner that dispatches through `client`.
    pub fn new(client: H) -> Self {
        Self { client }
    }

    /// Dispatch `count` copies of `descriptor` concurrently and collect their
    /// outcomes.
    ///
    /// The returned vector has exactly `count` entries, positioned by dispatch
    /// index regardless of the order in which responses arrived. A `count` of
    /// zero resolves immediately with an empty vector and emits no log events.
    ///
    /// # Errors
    /// Returns [`crate::VolleyError::Aggregation`] if a request task panicked
    /// or was cancelled before producing an outcome. Transport-level failures
    /// do not surface here; they are recorded per request as
    /// [`Outcome::Failure`].
    pub async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
        count: usize,
    ) -> Result<Vec<Outcome>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let batch_id = BatchId::from(Uuid::new_v4());
        let batch_started = Instant::now();

        tracing::info!(
            batch_id = %batch_id,
            count,
            method = %descriptor.method,
            url = %descriptor.url,
            "Dispatching request batch"
        );

        let handles: Vec<_> = (0..count)
            .map(|index| {
                let client = self.client.clone();
                let descriptor = descriptor.clone();
                tokio::spawn(async move {
                    let request_started = Instant::now();
                    let outcome = match client.execute(&descriptor).await {
                        Ok(response) => Outcome::Success {
                            status: response.status,
                            body: response.body,
                        },
                        Err(e) => Outcome::Failure {
                            error: e.to_string(),
                        },
                    };
                    let elapsed_ms = request_started.elapsed().as_millis() as u64;

                    match &outcome {
                        Outcome::Success { status, body } => {
                            tracing::info!(
                                batch_id = %batch_id,
                                index,
                                status = *status,
                                response_len = body.len(),
                                elapsed_ms,
                                "Request completed"
                            );
                            counter!(
                                "volley_requests_total",
                                "result" => "success"
                            )
                            .increment(1);
                        }
                        Outcome::Failure { error } => {
                            tracing::warn!(
                                batch_id = %batch_id,
                                index,
                                error = %error,
                                elapsed_ms,
                                "Request failed"
                            );
                            counter!(
                                "volley_requests_total",
                                "result" => "failure"
                            )
                            .increment(1);
                        }
                    }

                    outcome
                })
            })
            .collect();

        // join_all preserves input order, so outcomes line up with dispatch
        // indexes no matter when each response arrived.
        let mut outcomes = Vec::with_capacity(count);
        for handle in join_all(handles).await {
            outcomes.push(handle?);
        }

        tracing::info!(
            batch_id = %batch_id,
            count,
            elapsed_ms = batch_started.elapsed().as_millis() as u64,
            "Batch completed"
        );

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_id_displays_short_prefix() {
        let batch_id = BatchId::from(Uuid::new_v4());
        let displayed = batch_id.to_string();
        assert_eq!(displayed.len(), 8);
        assert!(batch_id.0.to_string().starts_with(&displayed));
    }
}
