//! Redacting wrappers that keep credential material out of logs.

// self
use crate::_prelude::*;

macro_rules! def_secret {
	($name:ident, $doc:literal, $label:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);
		impl $name {
			/// Wraps a new secret string.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple($label).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret! {
	ApiSecret,
	"Redacted API secret used as HMAC keying material; never printed in logs.",
	"ApiSecret"
}
def_secret! {
	Passphrase,
	"Redacted Coinbase Pro API passphrase sent in `CB-ACCESS-PASSPHRASE`.",
	"Passphrase"
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = ApiSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "ApiSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");

		let passphrase = Passphrase::new("hunter22");

		assert_eq!(format!("{passphrase:?}"), "Passphrase(\"<redacted>\")");
		assert_eq!(format!("{passphrase}"), "<redacted>");
	}

	#[test]
	fn expose_returns_inner_value() {
		let secret = ApiSecret::new("super-secret");

		assert_eq!(secret.expose(), "super-secret");
		assert_eq!(secret.as_ref(), "super-secret");
	}
}
