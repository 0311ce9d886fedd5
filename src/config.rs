//! Environment-backed configuration for constructing credentials.
//!
//! The deployment this crate grew out of keeps per-mode `.env` files (`v2.env`, `pro.env`)
//! with lowercase `cb_*` keys; those exact variable names are preserved. Telegram-related
//! variables (`tg_token`, `tg_user_id`) belong to the chat front-end, an external
//! collaborator with its own configuration surface, and are deliberately not read here.

// std
use std::{
	env::{self, VarError},
	path::Path,
};
// self
use crate::{
	_prelude::*,
	auth::{ApiMode, Credential, CredentialError},
};

/// Environment variable holding the API key.
pub const ENV_KEY: &str = "cb_key";
/// Environment variable holding the API secret.
pub const ENV_SECRET: &str = "cb_secret";
/// Environment variable holding the Coinbase Pro passphrase.
pub const ENV_PASSPHRASE: &str = "cb_passphrase";
/// Environment variable selecting Coinbase Pro mode when truthy (`1`, `true`, `yes`).
pub const ENV_PRO: &str = "cb_pro";

/// Errors emitted while loading configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A mandatory environment variable is absent or not valid unicode.
	#[error("Missing required environment variable `{name}`.")]
	MissingVar {
		/// The variable name.
		name: &'static str,
	},
	/// The `.env` file could not be loaded.
	#[error("Failed to load environment file.")]
	EnvFile {
		/// Underlying dotenv failure.
		#[from]
		source: dotenvy::Error,
	},
	/// A request URL could not be derived from the base endpoint.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parse failure.
		#[from]
		source: url::ParseError,
	},
}

/// Raw configuration values prior to credential validation.
#[derive(Clone, Deserialize, Serialize)]
pub struct SignerConfig {
	/// API key.
	pub key: String,
	/// API secret.
	pub secret: String,
	/// Coinbase Pro passphrase; ignored for v2.
	pub passphrase: Option<String>,
	/// Which API the credential targets.
	pub mode: ApiMode,
}
impl SignerConfig {
	/// Reads configuration from process environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		let mode = if is_truthy(env::var(ENV_PRO).ok().as_deref()) {
			ApiMode::Pro
		} else {
			ApiMode::V2
		};
		let passphrase = match env::var(ENV_PASSPHRASE) {
			Ok(value) => Some(value),
			Err(VarError::NotPresent) => None,
			Err(VarError::NotUnicode(_)) =>
				return Err(ConfigError::MissingVar { name: ENV_PASSPHRASE }),
		};

		Ok(Self { key: require(ENV_KEY)?, secret: require(ENV_SECRET)?, passphrase, mode })
	}

	/// Loads a `.env` file into the process environment first, then reads it.
	pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		dotenvy::from_path(path.as_ref())?;

		Self::from_env()
	}

	/// Runs full format validation and produces an immutable [`Credential`].
	pub fn into_credential(self) -> Result<Credential, CredentialError> {
		Credential::validate(&self.key, &self.secret, self.passphrase.as_deref(), self.mode)
	}
}
impl Debug for SignerConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignerConfig")
			.field("key", &self.key)
			.field("secret", &"<redacted>")
			.field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
			.field("mode", &self.mode)
			.finish()
	}
}

fn require(name: &'static str) -> Result<String, ConfigError> {
	env::var(name).map_err(|_| ConfigError::MissingVar { name })
}

fn is_truthy(value: Option<&str>) -> bool {
	matches!(
		value.map(str::trim),
		Some(v) if v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes") || v == "1"
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn truthy_values_select_pro_mode() {
		for value in ["1", "true", "TRUE", "yes", " Yes "] {
			assert!(is_truthy(Some(value)), "{value} should be truthy");
		}
		for value in ["", "0", "false", "no", "pro"] {
			assert!(!is_truthy(Some(value)), "{value} should not be truthy");
		}

		assert!(!is_truthy(None));
	}

	#[test]
	fn into_credential_runs_full_validation() {
		let config = SignerConfig {
			key: "ABCDEFGH12345678".into(),
			secret: "a".repeat(32),
			passphrase: None,
			mode: ApiMode::V2,
		};

		assert!(config.into_credential().is_ok());

		let config = SignerConfig {
			key: "too-short".into(),
			secret: "a".repeat(32),
			passphrase: None,
			mode: ApiMode::V2,
		};

		assert!(matches!(
			config.into_credential(),
			Err(CredentialError::InvalidFormat { .. })
		));
	}

	#[test]
	fn debug_redacts_secret_material() {
		let config = SignerConfig {
			key: "ABCDEFGH12345678".into(),
			secret: "a".repeat(32),
			passphrase: Some("fixture_passphrase".into()),
			mode: ApiMode::V2,
		};
		let rendered = format!("{config:?}");

		assert!(!rendered.contains(&"a".repeat(32)));
		assert!(!rendered.contains("fixture_passphrase"));
		assert!(rendered.contains("<redacted>"));
	}
}
