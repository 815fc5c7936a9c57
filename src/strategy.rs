//! The Younility strategy and its request-scoped sessions.
//!
//! [`YounilityStrategy`] holds only immutable configuration and can be shared across
//! concurrent requests. Each incoming request opens an [`AuthSession`] around the caller's
//! [`AccessToken`]; the session fetches the raw profile lazily, at most once, and serves
//! `uid`, `info`, and the full [`AuthRecord`] from that single payload. Credentials never
//! trigger a fetch.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	identity::{self, Credentials, NormalizedInfo},
	profile::{self, RawProfile},
	provider::{PROVIDER_NAME, StrategyOptions},
	record::{self, AuthRecord},
};

/// Identity strategy for the Younility provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct YounilityStrategy {
	/// Configuration supplied at construction.
	pub options: StrategyOptions,
}
impl YounilityStrategy {
	/// Creates a strategy for the provided options.
	pub fn new(options: StrategyOptions) -> Self {
		Self { options }
	}

	/// Provider name stamped on produced records.
	pub fn name(&self) -> &'static str {
		PROVIDER_NAME
	}

	/// Profile lookup path for the configured prefix.
	pub fn whoami_uri(&self) -> String {
		self.options.whoami_uri()
	}

	/// Opens a session for one authentication request.
	pub fn session<'a, T>(&'a self, token: &'a T) -> AuthSession<'a, T>
	where
		T: ?Sized + AccessToken,
	{
		AuthSession { strategy: self, token, raw_info: AsyncOnceCell::new() }
	}

	/// Resolves `token` into an [`AuthRecord`] with a single profile fetch.
	pub async fn authenticate<T>(&self, token: &T) -> Result<AuthRecord>
	where
		T: ?Sized + AccessToken,
	{
		self.session(token).auth_record().await
	}
}

/// Per-request view of the strategy bound to one access token.
///
/// Drop the session at the request boundary; the memoized profile goes with it.
pub struct AuthSession<'a, T>
where
	T: ?Sized + AccessToken,
{
	strategy: &'a YounilityStrategy,
	token: &'a T,
	raw_info: AsyncOnceCell<RawProfile>,
}
impl<T> AuthSession<'_, T>
where
	T: ?Sized + AccessToken,
{
	/// Returns the raw profile, fetching it on first use.
	///
	/// A failed fetch is not memoized; the next call performs a new GET.
	pub async fn raw_info(&self) -> Result<&RawProfile> {
		let profile = self
			.raw_info
			.get_or_try_init(|| async {
				let uri = self.strategy.whoami_uri();

				profile::fetch_profile(self.token, &uri).await
			})
			.await?;

		Ok(profile)
	}

	/// Unique identifier from the profile's `id` key.
	pub async fn uid(&self) -> Result<Option<JsonValue>> {
		Ok(identity::extract_uid(self.raw_info().await?))
	}

	/// Display information from the profile.
	pub async fn info(&self) -> Result<NormalizedInfo> {
		Ok(identity::extract_info(self.raw_info().await?))
	}

	/// Credential bundle from the token metadata; never performs I/O.
	pub fn credentials(&self) -> Credentials {
		identity::extract_credentials(self.token.issued())
	}

	/// Assembles the canonical record from one profile fetch and the token metadata.
	pub async fn auth_record(&self) -> Result<AuthRecord> {
		let profile = self.raw_info().await?;

		Ok(record::build_auth_record(
			self.strategy.name(),
			identity::extract_uid(profile),
			identity::extract_info(profile),
			self.credentials(),
		))
	}
}
impl<T> Debug for AuthSession<'_, T>
where
	T: ?Sized + AccessToken,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthSession")
			.field("provider", &self.strategy.name())
			.field("whoami_uri", &self.strategy.whoami_uri())
			.field("profile_fetched", &self.raw_info.is_initialized())
			.finish()
	}
}
