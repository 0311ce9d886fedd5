// self
use coinbase_signer::{
	auth::{ApiMode, Credential},
	sign::{self, Method, SigningRequest, Timestamp},
};

const V2_KEY: &str = "ABCDEFGH12345678";
const PRO_KEY: &str = "0123456789abcdef0123456789abcdef";
// base64 of 31 `a` bytes; decoding changes both byte length and content versus the raw
// secret string, which is what makes the PRO key-derivation tests meaningful.
const PRO_SECRET: &str = "YWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYQ==";
const PRO_PASSPHRASE: &str = "fixture_passphrase";

// Oracles computed once with an independent HMAC-SHA256 implementation.
const V2_GET_ACCOUNTS_SIG: &str =
	"a4487af0c49b8dff21c906ad97c29ee812bc388dc0f3b3c6acc05edce908999d";
const V2_POST_ORDERS_SIG: &str =
	"afc5dae2fbd1d359b8d5d8e18373c64a9635d6b08fe39c978298a8673bb35107";
const PRO_GET_ACCOUNTS_SIG: &str = "A5IM4OCQZMrzuBJaMAmky6P2faDdD/ed/OsBbUoYtCo=";
// Digest an implementation would produce if it wrongly keyed the MAC with the raw base64
// string instead of its decoded bytes.
const PRO_RAW_KEY_SIG: &str = "ib0JgAuT5QXZiN74Bws+zf4dOgNHnmHa2+QdzHV/R3I=";

fn v2_credential() -> Credential {
	Credential::validate(V2_KEY, "a".repeat(32), None, ApiMode::V2)
		.expect("V2 fixture credential should validate.")
}

fn pro_credential() -> Credential {
	Credential::validate(PRO_KEY, PRO_SECRET, Some(PRO_PASSPHRASE), ApiMode::Pro)
		.expect("PRO fixture credential should validate.")
}

#[test]
fn v2_reference_vector() {
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_unix(1_660_000_000));
	let headers =
		sign::sign(&v2_credential(), &request).expect("V2 signing should never fail.");

	assert_eq!(headers.signature(), V2_GET_ACCOUNTS_SIG);
	assert_eq!(headers.timestamp(), "1660000000");
	assert_eq!(headers.key(), V2_KEY);
}

#[test]
fn v2_reference_vector_with_body() {
	let request = SigningRequest::new(Method::Post, "/orders", &br#"{"size":"1"}"#[..])
		.at(Timestamp::from_unix(1_660_000_000));
	let headers =
		sign::sign(&v2_credential(), &request).expect("V2 signing should never fail.");

	assert_eq!(headers.signature(), V2_POST_ORDERS_SIG);
}

#[test]
fn signing_is_deterministic() {
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_unix(1_660_000_000));
	let first = sign::sign(&v2_credential(), &request).expect("V2 signing should never fail.");
	let second = sign::sign(&v2_credential(), &request).expect("V2 signing should never fail.");

	assert_eq!(first, second);

	let request = request.at(Timestamp::from_parts(1_660_000_000, 123_000));
	let first =
		sign::sign(&pro_credential(), &request).expect("PRO fixture signing should succeed.");
	let second =
		sign::sign(&pro_credential(), &request).expect("PRO fixture signing should succeed.");

	assert_eq!(first, second);
}

#[test]
fn pro_keys_the_mac_with_the_decoded_secret() {
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_parts(1_660_000_000, 123_000));
	let headers =
		sign::sign(&pro_credential(), &request).expect("PRO fixture signing should succeed.");

	assert_eq!(headers.signature(), PRO_GET_ACCOUNTS_SIG);
	assert_eq!(headers.timestamp(), "1660000000.123000");
	// Keying with the raw secret string must produce a different digest; if these ever
	// collide the key-derivation step silently stopped decoding.
	assert_ne!(headers.signature(), PRO_RAW_KEY_SIG);
}

#[test]
fn pro_headers_carry_the_passphrase() {
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_parts(1_660_000_000, 123_000));
	let headers =
		sign::sign(&pro_credential(), &request).expect("PRO fixture signing should succeed.");
	let pairs = headers.pairs();

	assert!(pairs.contains(&("CB-ACCESS-PASSPHRASE", PRO_PASSPHRASE)));
	assert!(pairs.contains(&("Content-Type", "application/json")));
	assert!(pairs.contains(&("CB-ACCESS-TIMESTAMP", "1660000000.123000")));
}

#[test]
fn v2_headers_omit_the_passphrase() {
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_unix(1_660_000_000));
	let headers =
		sign::sign(&v2_credential(), &request).expect("V2 signing should never fail.");

	assert!(headers.pairs().iter().all(|(name, _)| *name != "CB-ACCESS-PASSPHRASE"));
}

#[test]
fn malformed_pro_secret_fails_instead_of_signing_wrong() {
	// `abc==` satisfies the base64-shaped format pattern but is not decodable base64, so
	// signing must fail loudly rather than fall back to some other key derivation.
	let credential = Credential::validate(PRO_KEY, "abc==", Some(PRO_PASSPHRASE), ApiMode::Pro)
		.expect("The format pattern alone cannot reject this secret.");
	let request = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_parts(1_660_000_000, 123_000));
	let err = sign::sign(&credential, &request)
		.expect_err("An undecodable PRO secret must fail signing.");

	assert!(matches!(err, sign::SigningError::SecretNotBase64 { .. }));
}

#[test]
fn every_request_field_perturbs_the_signature() {
	let base = SigningRequest::new(Method::Get, "/accounts", Vec::new())
		.at(Timestamp::from_unix(1_660_000_000));
	let credential = v2_credential();
	let reference = sign::sign(&credential, &base)
		.expect("V2 signing should never fail.")
		.signature()
		.to_owned();
	let variants = [
		base.clone().at(Timestamp::from_unix(1_660_000_001)),
		SigningRequest { method: Method::Post, ..base.clone() },
		SigningRequest { path: "/accounts2".into(), ..base.clone() },
		SigningRequest { body: b"x".to_vec(), ..base.clone() },
	];

	for variant in variants {
		let signature = sign::sign(&credential, &variant)
			.expect("V2 signing should never fail.")
			.signature()
			.to_owned();

		assert_ne!(signature, reference, "variant {variant:?} must change the signature");
	}
}
