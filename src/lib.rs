//! Coinbase/Coinbase Pro request signing—validated credentials, deterministic HMAC-SHA256
//! headers, and a thin reqwest call wrapper in one crate.
//!
//! The crate splits the problem into three layers:
//!
//! - [`auth`] validates raw credential material against the exact per-mode formats before any
//!   network call is attempted, so failures surface immediately instead of as an opaque remote
//!   401.
//! - [`sign`] computes the `CB-ACCESS-*` headers as a pure, deterministic function of
//!   `(credential, request)`; both APIs recompute the same canonical message server-side.
//! - [`http`] is a deliberately thin pass-through around `reqwest` that signs, sends, and maps
//!   failures into a closed error taxonomy. No retry, backoff, or caching lives anywhere in the
//!   crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod sign;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
