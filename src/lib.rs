//! Younility identity strategy: turn an already-issued OAuth 2.0 access token into a canonical
//! identity record by calling the provider's `whoami` endpoint.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`provider::whoami_uri`] builds the profile path from the configured prefix.
//! 2. [`profile::fetch_profile`] performs one authenticated GET through an injected
//!    [`auth::AccessToken`].
//! 3. [`identity`] projects the raw profile (and token metadata) into uid, info, and
//!    credentials.
//! 4. [`record::build_auth_record`] combines the projections into an [`record::AuthRecord`].
//!
//! [`strategy::YounilityStrategy`] wires the steps together behind request-scoped
//! [`strategy::AuthSession`]s that fetch the profile at most once.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod identity;
pub mod obs;
pub mod profile;
pub mod provider;
pub mod record;
pub mod strategy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and fakes for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use async_lock::Mutex as AsyncMutex;

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AccessToken, IssuedToken},
		error::UpstreamError,
		http::{WhoamiFuture, WhoamiResponse},
	};

	/// In-memory [`AccessToken`] that answers every GET with a canned response and records the
	/// requested paths.
	#[derive(Clone, Debug)]
	pub struct FakeAccessToken {
		issued: IssuedToken,
		status: u16,
		body: Vec<u8>,
		requests: Arc<AsyncMutex<Vec<String>>>,
	}
	impl FakeAccessToken {
		/// Creates a fake that answers with `200 OK` and the JSON encoding of `body`.
		pub fn responding(issued: IssuedToken, body: &serde_json::Value) -> Self {
			Self::with_raw_response(issued, 200, body.to_string().into_bytes())
		}

		/// Creates a fake that answers with an arbitrary status and body.
		pub fn with_raw_response(issued: IssuedToken, status: u16, body: Vec<u8>) -> Self {
			Self { issued, status, body, requests: Default::default() }
		}

		/// Returns every path requested so far, in order.
		pub async fn requested_paths(&self) -> Vec<String> {
			self.requests.lock().await.clone()
		}
	}
	impl AccessToken for FakeAccessToken {
		fn issued(&self) -> &IssuedToken {
			&self.issued
		}

		fn get<'a>(&'a self, path: &'a str) -> WhoamiFuture<'a> {
			Box::pin(async move {
				self.requests.lock().await.push(path.to_owned());

				Ok::<_, UpstreamError>(WhoamiResponse::new(self.status, self.body.clone()))
			})
		}
	}

	/// Token metadata used across the provider's recorded fixtures.
	pub fn fixture_token() -> IssuedToken {
		IssuedToken::new("123")
			.with_refresh_token("abcd")
			.with_expires_in(34345)
			.with_expires_at(12345)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::OnceCell as AsyncOnceCell;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::Result;
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
