//! Concurrent fan-out of identical HTTP requests.
//!
//! This crate dispatches a batch of identical requests all at once and, once
//! every one of them has finished, reports one outcome per request in
//! dispatch order. Transport failures are captured per request rather than
//! aborting the batch, so a refused connection on one dispatch never hides
//! the responses of its siblings.

pub mod error;
pub mod http;
pub mod outcome;
pub mod request;
pub mod runner;

// Re-export commonly used types
pub use error::{Result, VolleyError};
pub use http::{HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
pub use outcome::Outcome;
pub use request::RequestDescriptor;
pub use runner::{BatchId, FanoutRunner};
