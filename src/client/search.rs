//! Remote poem lookup with cancellation.
//!
//! [`PoemSearchClient`] builds line-search requests, sends them through a
//! [`Transport`], and classifies the responses that come back. The host cannot
//! abort a request once sent, so cancellation is enforced here: the client keeps
//! the set of in-flight ids, and a response whose id has been cancelled
//! resolves to nothing at all.

use super::context::RequestContext;
use super::response;
use crate::domain::error::Result;
use crate::domain::{RequestId, ResultSet, SearchError};
use std::collections::BTreeMap;

/// Public PoetryDB endpoint.
pub const DEFAULT_BASE_URL: &str = "https://poetrydb.org";

/// Sends GET requests on behalf of the client.
///
/// The Zellij shim implements this with `web_request`; tests use an in-memory
/// recorder. Responses are delivered later, out of band, together with the
/// `context` map passed here.
pub trait Transport {
    fn get(&mut self, url: &str, context: BTreeMap<String, String>);
}

/// Identifies an issued lookup for cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHandle {
    pub id: RequestId,
    pub term: String,
}

/// A delivered lookup outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCompletion {
    pub id: RequestId,
    pub term: String,
    pub result: std::result::Result<ResultSet, SearchError>,
}

/// Client for the line-search endpoint.
#[derive(Debug, Clone)]
pub struct PoemSearchClient {
    base_url: String,
    in_flight: BTreeMap<RequestId, String>,
}

impl Default for PoemSearchClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PoemSearchClient {
    /// Creates a client for `base_url`; a trailing `/` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            in_flight: BTreeMap::new(),
        }
    }

    /// URL of the line search for `term`.
    ///
    /// # Examples
    ///
    /// ```
    /// use poemseek::client::PoemSearchClient;
    ///
    /// let client = PoemSearchClient::new("https://poetrydb.org/");
    /// assert_eq!(client.request_url("hope springs"), "https://poetrydb.org/lines/hope%20springs/.json");
    /// ```
    #[must_use]
    pub fn request_url(&self, term: &str) -> String {
        format!("{}/lines/{}/.json", self.base_url, urlencoding::encode(term))
    }

    /// Issues the lookup `id` for `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request context cannot be encoded; nothing is
    /// sent in that case.
    #[tracing::instrument(level = "debug", skip(self, transport), fields(request = %id))]
    pub fn search<T: Transport + ?Sized>(&mut self, id: RequestId, term: &str, transport: &mut T) -> Result<SearchHandle> {
        let context = RequestContext::new(id, term).to_map()?;
        let url = self.request_url(term);

        tracing::debug!(url = %url, "sending poem lookup");
        transport.get(&url, context);
        self.in_flight.insert(id, term.to_string());

        Ok(SearchHandle {
            id,
            term: term.to_string(),
        })
    }

    /// Cancels the lookup behind `handle`.
    pub fn cancel(&mut self, handle: &SearchHandle) -> bool {
        tracing::debug!(term = %handle.term, "cancelling lookup");
        self.cancel_id(handle.id)
    }

    /// Cancels lookup `id`; returns whether it was still in flight.
    pub fn cancel_id(&mut self, id: RequestId) -> bool {
        let was_in_flight = self.in_flight.remove(&id).is_some();
        tracing::debug!(request = %id, was_in_flight, "lookup cancelled");
        was_in_flight
    }

    /// Cancels every outstanding lookup.
    pub fn cancel_all(&mut self) {
        self.in_flight.clear();
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Turns a host response into a completion.
    ///
    /// Returns `Ok(None)` for cancelled or unknown requests.
    ///
    /// # Errors
    ///
    /// Returns an error if `context` was not produced by this client.
    pub fn resolve(&mut self, status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Result<Option<SearchCompletion>> {
        let ctx = RequestContext::from_map(context)?;
        let _trace_guard = ctx.trace_context.as_ref().and_then(super::context::TraceContext::attach);
        let _span = tracing::debug_span!("resolve_lookup", request = %ctx.request_id, status).entered();

        if self.in_flight.remove(&ctx.request_id).is_none() {
            tracing::debug!("response for cancelled lookup ignored");
            return Ok(None);
        }

        let result = response::classify(status, body);
        match &result {
            Ok(poems) => tracing::debug!(count = poems.len(), "lookup returned poems"),
            Err(e) => tracing::debug!(error = %e, "lookup returned error"),
        }

        Ok(Some(SearchCompletion {
            id: ctx.request_id,
            term: ctx.term,
            result,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: Vec<(String, BTreeMap<String, String>)>,
    }

    impl Transport for Recorder {
        fn get(&mut self, url: &str, context: BTreeMap<String, String>) {
            self.sent.push((url.to_string(), context));
        }
    }

    const ONE_POEM: &[u8] = br#"[{"title":"Hope","author":"Emily Dickinson","lines":["feathers"]}]"#;

    #[test]
    fn url_encodes_term() {
        let client = PoemSearchClient::default();
        assert_eq!(client.request_url("love/hate?"), "https://poetrydb.org/lines/love%2Fhate%3F/.json");
    }

    #[test]
    fn search_sends_request_with_context() {
        let mut client = PoemSearchClient::default();
        let mut transport = Recorder::default();
        let handle = client.search(RequestId(1), "hope", &mut transport).unwrap();

        assert_eq!(handle, SearchHandle { id: RequestId(1), term: "hope".to_string() });
        assert_eq!(transport.sent.len(), 1);
        assert_eq!(transport.sent[0].0, "https://poetrydb.org/lines/hope/.json");
        assert_eq!(client.in_flight_count(), 1);
    }

    #[test]
    fn resolve_delivers_current_response_once() {
        let mut client = PoemSearchClient::default();
        let mut transport = Recorder::default();
        client.search(RequestId(1), "hope", &mut transport).unwrap();
        let context = transport.sent[0].1.clone();

        let completion = client.resolve(200, ONE_POEM, &context).unwrap().unwrap();
        assert_eq!(completion.id, RequestId(1));
        assert_eq!(completion.term, "hope");
        assert_eq!(completion.result.unwrap().len(), 1);

        assert_eq!(client.resolve(200, ONE_POEM, &context).unwrap(), None);
    }

    #[test]
    fn cancelled_request_delivers_nothing() {
        let mut client = PoemSearchClient::default();
        let mut transport = Recorder::default();
        let handle = client.search(RequestId(3), "hope", &mut transport).unwrap();
        assert!(client.cancel(&handle));
        assert!(!client.cancel(&handle));

        let context = transport.sent[0].1.clone();
        assert_eq!(client.resolve(200, ONE_POEM, &context).unwrap(), None);
        assert_eq!(client.resolve(500, b"boom", &context).unwrap(), None);
    }

    #[test]
    fn not_found_marker_is_delivered_as_not_found() {
        let mut client = PoemSearchClient::default();
        let mut transport = Recorder::default();
        client.search(RequestId(1), "zzzzz", &mut transport).unwrap();
        let completion = client
            .resolve(200, br#"{"status":404,"reason":"Not found"}"#, &transport.sent[0].1)
            .unwrap()
            .unwrap();
        assert_eq!(completion.result, Err(SearchError::NotFound));
    }

    #[test]
    fn foreign_context_is_an_error() {
        let mut client = PoemSearchClient::default();
        assert!(client.resolve(200, ONE_POEM, &BTreeMap::new()).is_err());
    }
}
