//! Remote poem lookup.
//!
//! The lookup is asynchronous in the host's sense: a request is handed to the
//! Zellij runtime through a [`Transport`], and the response arrives later as a
//! separate event carrying the context map the request was sent with.
//!
//! # Architecture
//!
//! - `context`: Request identity and trace context encoded into the host's context map
//! - `response`: Classification of HTTP status + JSON body into poems or a [`SearchError`](crate::domain::SearchError)
//! - `search`: [`PoemSearchClient`] with in-flight bookkeeping and cancellation

pub mod context;
pub mod response;
pub mod search;

pub use context::{RequestContext, TraceContext};
pub use search::{PoemSearchClient, SearchCompletion, SearchHandle, Transport, DEFAULT_BASE_URL};
