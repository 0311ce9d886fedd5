//! Credential construction and format validation.
//!
//! Coinbase issues two credential shapes: the v2 API uses a 16-character alphanumeric key
//! with a 32-character alphanumeric secret, while Coinbase Pro uses a 32-character
//! lowercase-hex key, a padded base64 secret, and a passphrase. Validation happens once, at
//! construction, so a malformed credential fails locally with the offending field named
//! instead of surfacing later as an opaque remote 401.

// std
use std::sync::OnceLock;
// crates.io
use regex::Regex;
// self
use crate::{
	_prelude::*,
	auth::{ApiSecret, Passphrase},
};

/// Coinbase API variants with distinct credential formats and signing schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
	/// Coinbase v2 API (`api.coinbase.com/v2`).
	V2,
	/// Coinbase Pro API (`api.pro.coinbase.com`).
	Pro,
}
impl ApiMode {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiMode::V2 => "v2",
			ApiMode::Pro => "pro",
		}
	}

	/// Default REST endpoint for the mode.
	pub fn base_url(self) -> Url {
		let raw = match self {
			ApiMode::V2 => "https://api.coinbase.com/v2/",
			ApiMode::Pro => "https://api.pro.coinbase.com/",
		};

		Url::parse(raw).expect("Known-good endpoint literal should parse.")
	}
}
impl Display for ApiMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Credential fields named by validation failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialField {
	/// The API key.
	Key,
	/// The API secret.
	Secret,
	/// The Coinbase Pro passphrase.
	Passphrase,
}
impl CredentialField {
	/// Returns a stable label suitable for error messages and log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialField::Key => "key",
			CredentialField::Secret => "secret",
			CredentialField::Passphrase => "passphrase",
		}
	}
}
impl Display for CredentialField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Errors emitted when validating credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CredentialError {
	/// A field does not match the format its mode requires.
	#[error("Coinbase API {field} is invalid for the {mode} API.")]
	InvalidFormat {
		/// The offending field.
		field: CredentialField,
		/// The mode whose pattern the field failed.
		mode: ApiMode,
	},
	/// PRO mode requires a passphrase but none was provided.
	#[error("Coinbase Pro API passphrase not provided.")]
	MissingPassphrase,
}

/// Immutable, validated API credential held for the lifetime of a client.
///
/// Constructed only through [`Credential::validate`]; a failed validation never yields a
/// partially populated value. Reads are lock-free, so sharing `&Credential` across tasks is
/// safe without coordination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
	key: String,
	secret: ApiSecret,
	passphrase: Option<Passphrase>,
	mode: ApiMode,
}
impl Credential {
	/// Validates raw credential material and constructs a [`Credential`].
	///
	/// A passphrase is mandatory for [`ApiMode::Pro`] and ignored for [`ApiMode::V2`].
	pub fn validate(
		key: impl AsRef<str>,
		secret: impl AsRef<str>,
		passphrase: Option<&str>,
		mode: ApiMode,
	) -> Result<Self, CredentialError> {
		let key = key.as_ref();
		let secret = secret.as_ref();

		match mode {
			ApiMode::V2 => {
				check(v2_key_pattern(), key, CredentialField::Key, mode)?;
				check(v2_secret_pattern(), secret, CredentialField::Secret, mode)?;

				Ok(Self {
					key: key.to_owned(),
					secret: ApiSecret::new(secret),
					passphrase: None,
					mode,
				})
			},
			ApiMode::Pro => {
				check(pro_key_pattern(), key, CredentialField::Key, mode)?;
				check(pro_secret_pattern(), secret, CredentialField::Secret, mode)?;

				let passphrase = passphrase.ok_or(CredentialError::MissingPassphrase)?;

				check(pro_passphrase_pattern(), passphrase, CredentialField::Passphrase, mode)?;

				Ok(Self {
					key: key.to_owned(),
					secret: ApiSecret::new(secret),
					passphrase: Some(Passphrase::new(passphrase)),
					mode,
				})
			},
		}
	}

	/// API key as sent in `CB-ACCESS-KEY`.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Redacted secret wrapper.
	pub const fn secret(&self) -> &ApiSecret {
		&self.secret
	}

	/// Passphrase, present only for [`ApiMode::Pro`] credentials.
	pub const fn passphrase(&self) -> Option<&Passphrase> {
		self.passphrase.as_ref()
	}

	/// The API mode the credential belongs to.
	pub const fn mode(&self) -> ApiMode {
		self.mode
	}
}

fn check(
	pattern: &Regex,
	value: &str,
	field: CredentialField,
	mode: ApiMode,
) -> Result<(), CredentialError> {
	if pattern.is_match(value) {
		Ok(())
	} else {
		Err(CredentialError::InvalidFormat { field, mode })
	}
}

fn pattern(cell: &'static OnceLock<Regex>, raw: &'static str) -> &'static Regex {
	cell.get_or_init(|| Regex::new(raw).expect("Credential pattern literal should compile."))
}

fn v2_key_pattern() -> &'static Regex {
	static CELL: OnceLock<Regex> = OnceLock::new();

	pattern(&CELL, r"^[A-Za-z0-9]{16}$")
}

fn v2_secret_pattern() -> &'static Regex {
	static CELL: OnceLock<Regex> = OnceLock::new();

	pattern(&CELL, r"^[A-Za-z0-9]{32}$")
}

fn pro_key_pattern() -> &'static Regex {
	static CELL: OnceLock<Regex> = OnceLock::new();

	pattern(&CELL, r"^[a-f0-9]{32}$")
}

fn pro_secret_pattern() -> &'static Regex {
	static CELL: OnceLock<Regex> = OnceLock::new();

	pattern(&CELL, r"^[A-Za-z0-9+/]+==$")
}

fn pro_passphrase_pattern() -> &'static Regex {
	static CELL: OnceLock<Regex> = OnceLock::new();

	pattern(&CELL, r"^[A-Za-z0-9#$%=@!{},`~&*()<>?.:;_|^/+\[\]]{8,32}$")
}
