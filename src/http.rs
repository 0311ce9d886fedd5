//! REST transport: response interpretation plus the reqwest-backed call wrapper.
//!
//! Interpreting a `(status, body)` pair is a pure function so the error taxonomy stays
//! testable without a network. [`RestClient`] is a deliberately thin pass-through that
//! signs, sends, and maps failures; every failure is surfaced to the immediate caller with
//! no retry, circuit breaking, or backpressure in between.

// crates.io
use serde_json::Value;
// self
#[cfg(feature = "reqwest")]
use crate::{
	auth::Credential,
	config::ConfigError,
	error::TransportError,
	obs::{self, RequestOutcome, RequestSpan},
	sign::{self, Method, SigningRequest},
};
use crate::{_prelude::*, error::ResponseError};

/// Upper bound on the body excerpt carried inside decode errors.
const SNIPPET_MAX_LEN: usize = 256;

/// Classifies a `(status, body)` pair into the crate error taxonomy.
///
/// - 2xx with valid JSON yields the decoded value.
/// - Non-2xx with valid JSON yields [`Error::Remote`] carrying the body's `msg` or
///   `message` field (empty when neither is present).
/// - A body that fails to parse yields [`ResponseError::Decode`] with the raw status and a
///   bounded snippet, whatever the status was.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Value> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let value: Value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ResponseError::Decode { status, snippet: snippet_of(body), source })?;

	if (200..300).contains(&status) {
		return Ok(value);
	}

	Err(Error::Remote { status, message: remote_message(&value).to_owned() })
}

fn remote_message(value: &Value) -> &str {
	value
		.get("msg")
		.and_then(Value::as_str)
		.or_else(|| value.get("message").and_then(Value::as_str))
		.unwrap_or("")
}

fn snippet_of(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	match text.char_indices().nth(SNIPPET_MAX_LEN) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.into_owned(),
	}
}

/// Thin authenticated REST wrapper around [`ReqwestClient`].
///
/// Holds one immutable [`Credential`] for its lifetime; concurrent calls share it by
/// reference without locking. Paths are joined onto the base URL, so pass them relative
/// (`accounts`, `products/BTC-USD/ticker?level=1`).
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct RestClient {
	http: ReqwestClient,
	base_url: Url,
	credential: Credential,
}
#[cfg(feature = "reqwest")]
impl RestClient {
	/// Builds a client against the credential mode's default endpoint.
	pub fn new(credential: Credential) -> Self {
		let base_url = credential.mode().base_url();

		Self { http: ReqwestClient::new(), base_url, credential }
	}

	/// Builds a client against an explicit endpoint, e.g. a sandbox or a mock server.
	pub fn with_base_url(credential: Credential, base_url: Url) -> Self {
		Self { http: ReqwestClient::new(), base_url, credential }
	}

	/// Replaces the underlying [`ReqwestClient`], keeping credential and endpoint.
	pub fn with_http_client(mut self, http: ReqwestClient) -> Self {
		self.http = http;

		self
	}

	/// The credential the client signs with.
	pub const fn credential(&self) -> &Credential {
		&self.credential
	}

	/// Issues a signed GET request.
	pub async fn get(&self, path: &str) -> Result<Value> {
		self.call(Method::Get, path, Vec::new()).await
	}

	/// Issues a signed POST request with a JSON body.
	pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
		self.call(Method::Post, path, body.to_string().into_bytes()).await
	}

	/// Issues a signed DELETE request.
	pub async fn delete(&self, path: &str) -> Result<Value> {
		self.call(Method::Delete, path, Vec::new()).await
	}

	async fn call(&self, method: Method, path: &str, body: Vec<u8>) -> Result<Value> {
		const STAGE: &str = "rest_call";

		let mode = self.credential.mode();
		let span = RequestSpan::new(mode, STAGE);

		obs::record_request_outcome(mode, RequestOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self
					.base_url
					.join(path.trim_start_matches('/'))
					.map_err(|source| ConfigError::InvalidUrl { source })?;
				let path_and_query = path_and_query_of(&url);
				// The timestamp is stamped here, immediately before header construction,
				// never earlier in the surrounding call.
				let request = SigningRequest::new(method, path_and_query, body);
				let headers = sign::sign(&self.credential, &request)?;
				let builder = match method {
					Method::Get => self.http.get(url),
					Method::Post => self.http.post(url).body(request.body.clone()),
					Method::Delete => self.http.delete(url),
				};
				let response =
					headers.apply(builder).send().await.map_err(TransportError::from)?;
				let status = response.status().as_u16();
				let bytes = response.bytes().await.map_err(TransportError::from)?;

				interpret_response(status, &bytes)
			})
			.await;

		match &result {
			Ok(_) => obs::record_request_outcome(mode, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(mode, RequestOutcome::Failure),
		}

		result
	}
}

/// Path plus query exactly as the remote verifier sees them.
#[cfg(feature = "reqwest")]
fn path_and_query_of(url: &Url) -> String {
	match url.query() {
		Some(query) => format!("{}?{query}", url.path()),
		None => url.path().to_owned(),
	}
}
