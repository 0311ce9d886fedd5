//! Crate-level error types shared across validation, signing, and transport.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// The set is closed on purpose: every failure a call can produce belongs to exactly one
/// variant, and callers are expected to handle each kind instead of funneling everything
/// through a catch-all.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential format validation failure; fatal to client construction.
	#[error(transparent)]
	Credential(#[from] crate::auth::CredentialError),
	/// Signature construction failure.
	#[error(transparent)]
	Signing(#[from] crate::sign::SigningError),
	/// Configuration loading problem.
	#[error(transparent)]
	Config(#[from] crate::config::ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Response(#[from] ResponseError),

	/// Remote API answered with a non-2xx status and a decodable error body.
	#[error("Remote API error ({status}): {message}.")]
	Remote {
		/// HTTP status code returned by the API.
		status: u16,
		/// Message extracted from the body's `msg` or `message` field; empty when neither
		/// is present.
		message: String,
	},
}
impl Error {
	/// Returns an operator-facing hint for failures with a well-known remedy.
	///
	/// Coinbase rejects requests whose timestamp drifts outside its acceptance window with a
	/// 401 `request timestamp expired`; the fix is almost always an unsynchronized system
	/// clock rather than a bad credential.
	pub fn hint(&self) -> Option<&'static str> {
		match self {
			Self::Remote { status: 401, message } if message == "request timestamp expired" =>
				Some("check that your system time is synchronized via NTP"),
			_ => None,
		}
	}
}

/// Transport-level failures raised by the underlying HTTP client.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Connection could not be established.
	#[error("Connection error while calling the API.")]
	Connection {
		/// Transport-specific network failure.
		#[source]
		source: BoxError,
	},
	/// The request timed out.
	#[error("Request timed out while calling the API.")]
	Timeout {
		/// Transport-specific timeout failure.
		#[source]
		source: BoxError,
	},
	/// The HTTP exchange itself failed (malformed request, protocol error).
	#[error("HTTP error while calling the API.")]
	Http {
		/// Transport-specific protocol failure.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific connection error.
	pub fn connection(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Connection { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	/// Wraps any other transport-specific failure.
	pub fn http(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Http { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() {
			Self::timeout(e)
		} else if e.is_connect() {
			Self::connection(e)
		} else {
			Self::http(e)
		}
	}
}

/// Body-decoding failures carrying enough context to diagnose the payload.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// The response body was not valid JSON.
	#[error("Response body is not valid JSON (status {status}): {snippet}")]
	Decode {
		/// HTTP status code the body arrived with.
		status: u16,
		/// Bounded excerpt of the raw body.
		snippet: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
