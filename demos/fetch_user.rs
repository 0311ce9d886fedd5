//! Demonstrates validating a credential, signing a request, and issuing a call through the
//! thin REST wrapper, against a local mock so the demo runs without real API keys.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use coinbase_signer::{
	auth::{ApiMode, Credential},
	http::RestClient,
	sign::{self, Method, SigningRequest, Timestamp},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	// Fail fast, before any network call: a malformed key never leaves the process.
	let credential =
		Credential::validate("ABCDEFGH12345678", "a".repeat(32), None, ApiMode::V2)?;

	// The signer is a pure function; an explicit timestamp makes the output reproducible.
	let request = SigningRequest::new(Method::Get, "/v2/user", Vec::new())
		.at(Timestamp::from_unix(1_660_000_000));
	let headers = sign::sign(&credential, &request)?;

	println!("CB-ACCESS-SIGN      = {}", headers.signature());
	println!("CB-ACCESS-TIMESTAMP = {}", headers.timestamp());

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/user").header_exists("CB-ACCESS-SIGN");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"data":{"name":"demo-user"}}"#);
		})
		.await;

	let client = RestClient::with_base_url(credential, Url::parse(&server.base_url())?);
	let user = client.get("user").await?;

	println!("user = {user}");

	Ok(())
}
