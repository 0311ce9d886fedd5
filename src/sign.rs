//! Deterministic HMAC-SHA256 request signing.
//!
//! Both Coinbase APIs authenticate a request by recomputing the canonical message
//! `timestamp + method + path + body` and comparing an HMAC-SHA256 digest over those exact
//! bytes. There are no separators between the fields; adjacency is part of the contract
//! because the remote verifier rebuilds the identical concatenation. The v2 API keys the
//! MAC with the UTF-8 secret and sends a hex digest over whole-second timestamps; Coinbase
//! Pro keys it with the base64-decoded secret and sends a base64 digest over fractional
//! timestamps.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{ApiMode, Credential, Passphrase},
};

/// Header carrying the request signature.
pub const CB_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
/// Header carrying the timestamp the signature covers.
pub const CB_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
/// Header carrying the API key.
pub const CB_ACCESS_KEY: &str = "CB-ACCESS-KEY";
/// Header carrying the Coinbase Pro passphrase.
pub const CB_ACCESS_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

type HmacSha256 = Hmac<Sha256>;

/// Errors emitted while constructing a signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The PRO secret is not valid base64, so no HMAC key can be derived.
	///
	/// Fatal: a request signed with the wrong key bytes would be silently rejected remotely,
	/// so the decode failure is surfaced instead.
	#[error("Coinbase Pro API secret is not valid base64.")]
	SecretNotBase64 {
		/// Underlying decode failure.
		#[from]
		source: base64::DecodeError,
	},
}

/// HTTP methods accepted by the signer.
///
/// A closed enum instead of free-form strings: an unsupported method is unrepresentable
/// rather than a runtime validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
	/// HTTP DELETE.
	Delete,
}
impl Method {
	/// Uppercase method name as it enters the canonical message.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Wall-clock instant a signature covers.
///
/// Captured immediately before header construction (not earlier in the surrounding call) to
/// keep skew against the remote acceptance window minimal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp {
	secs: i64,
	micros: u32,
}
impl Timestamp {
	/// Captures the current wall-clock time.
	pub fn now() -> Self {
		let now = OffsetDateTime::now_utc();

		Self { secs: now.unix_timestamp(), micros: now.microsecond() }
	}

	/// Whole-second timestamp; fraction is zero.
	pub const fn from_unix(secs: i64) -> Self {
		Self { secs, micros: 0 }
	}

	/// Timestamp with an explicit microsecond fraction.
	pub const fn from_parts(secs: i64, micros: u32) -> Self {
		Self { secs, micros }
	}

	/// Decimal whole seconds, the v2 wire form.
	pub fn whole(&self) -> String {
		self.secs.to_string()
	}

	/// Seconds with a six-digit fraction, the Coinbase Pro wire form.
	pub fn fractional(&self) -> String {
		format!("{}.{:06}", self.secs, self.micros)
	}

	fn render(&self, mode: ApiMode) -> String {
		match mode {
			ApiMode::V2 => self.whole(),
			ApiMode::Pro => self.fractional(),
		}
	}
}

/// Outgoing request descriptor consumed by [`sign`].
///
/// Created per call and consumed immediately; never retained or reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningRequest {
	/// HTTP method.
	pub method: Method,
	/// Path and query exactly as the server sees them (e.g. `/v2/accounts?limit=5`).
	pub path: String,
	/// Raw request body; empty for bodyless calls.
	pub body: Vec<u8>,
	/// Instant the signature covers.
	pub timestamp: Timestamp,
}
impl SigningRequest {
	/// Builds a request descriptor stamped with the current wall-clock time.
	pub fn new(method: Method, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
		Self { method, path: path.into(), body: body.into(), timestamp: Timestamp::now() }
	}

	/// Re-stamps the request with an explicit timestamp, for deterministic signing.
	pub fn at(mut self, timestamp: Timestamp) -> Self {
		self.timestamp = timestamp;

		self
	}
}

/// Authentication headers for one request.
///
/// Timestamp-dependent, produced fresh per request, never cached: the timestamp string
/// carried here is byte-identical to the one folded into the signature, and a mismatch
/// between the two invalidates the signature remotely.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedHeaders {
	key: String,
	signature: String,
	timestamp: String,
	passphrase: Option<String>,
}
impl SignedHeaders {
	/// `CB-ACCESS-SIGN` value.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// `CB-ACCESS-TIMESTAMP` value.
	pub fn timestamp(&self) -> &str {
		&self.timestamp
	}

	/// `CB-ACCESS-KEY` value.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Header name/value pairs, content type included.
	pub fn pairs(&self) -> Vec<(&'static str, &str)> {
		let mut pairs = vec![
			(CB_ACCESS_SIGN, self.signature.as_str()),
			(CB_ACCESS_TIMESTAMP, self.timestamp.as_str()),
			(CB_ACCESS_KEY, self.key.as_str()),
			(CONTENT_TYPE, APPLICATION_JSON),
		];

		if let Some(passphrase) = &self.passphrase {
			pairs.push((CB_ACCESS_PASSPHRASE, passphrase.as_str()));
		}

		pairs
	}

	/// Attaches the headers to a reqwest request builder.
	#[cfg(feature = "reqwest")]
	pub fn apply(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		for (name, value) in self.pairs() {
			builder = builder.header(name, value);
		}

		builder
	}
}
impl Debug for SignedHeaders {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignedHeaders")
			.field("key", &self.key)
			.field("signature", &self.signature)
			.field("timestamp", &self.timestamp)
			.field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Computes the authentication headers for one request.
///
/// Pure and deterministic: the same `(credential, request)` pair always yields
/// byte-identical headers. The only possible failure is a PRO secret that does not decode
/// as base64.
pub fn sign(
	credential: &Credential,
	request: &SigningRequest,
) -> Result<SignedHeaders, SigningError> {
	let timestamp = request.timestamp.render(credential.mode());
	let message = canonical_message(&timestamp, request);
	let signature = match credential.mode() {
		ApiMode::V2 => hex::encode(mac_over(credential.secret().expose().as_bytes(), &message)),
		ApiMode::Pro => {
			let key = STANDARD.decode(credential.secret().expose())?;

			STANDARD.encode(mac_over(&key, &message))
		},
	};

	Ok(SignedHeaders {
		key: credential.key().to_owned(),
		signature,
		timestamp,
		passphrase: credential.passphrase().map(Passphrase::expose).map(str::to_owned),
	})
}

fn canonical_message(timestamp: &str, request: &SigningRequest) -> Vec<u8> {
	let mut message = Vec::with_capacity(
		timestamp.len() + request.method.as_str().len() + request.path.len() + request.body.len(),
	);

	message.extend_from_slice(timestamp.as_bytes());
	message.extend_from_slice(request.method.as_str().as_bytes());
	message.extend_from_slice(request.path.as_bytes());
	message.extend_from_slice(&request.body);

	message
}

fn mac_over(key: &[u8], message: &[u8]) -> Vec<u8> {
	let mut mac =
		HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length.");

	mac.update(message);

	mac.finalize().into_bytes().to_vec()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn canonical_message_has_no_separators() {
		let request = SigningRequest::new(Method::Post, "/v2/orders", &b"{\"size\":\"1\"}"[..])
			.at(Timestamp::from_unix(1_660_000_000));
		let message = canonical_message("1660000000", &request);

		assert_eq!(message, b"1660000000POST/v2/orders{\"size\":\"1\"}");
	}

	#[test]
	fn timestamp_renders_per_mode() {
		let stamp = Timestamp::from_parts(1_660_000_000, 123_000);

		assert_eq!(stamp.whole(), "1660000000");
		assert_eq!(stamp.fractional(), "1660000000.123000");
		assert_eq!(Timestamp::from_unix(1_660_000_000).fractional(), "1660000000.000000");
	}

	#[test]
	fn method_names_are_uppercase() {
		assert_eq!(Method::Get.as_str(), "GET");
		assert_eq!(Method::Post.as_str(), "POST");
		assert_eq!(Method::Delete.as_str(), "DELETE");
	}

	#[test]
	fn signed_headers_debug_redacts_passphrase() {
		let credential = Credential::validate(
			"0123456789abcdef0123456789abcdef",
			"YWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYQ==",
			Some("fixture_passphrase"),
			ApiMode::Pro,
		)
		.expect("PRO fixture credential should validate.");
		let headers = sign(
			&credential,
			&SigningRequest::new(Method::Get, "/accounts", Vec::new()),
		)
		.expect("Signing the PRO fixture should succeed.");
		let rendered = format!("{headers:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("fixture_passphrase"));
	}
}
