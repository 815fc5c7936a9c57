// self
use crate::_prelude::*;

/// Span wrapping a single `whoami` fetch.
#[derive(Clone, Debug)]
pub struct WhoamiSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl WhoamiSpan {
	/// Creates a span tagged with the requested URI.
	pub fn new(uri: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("oauth2_younility.whoami", uri);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = uri;

			Self {}
		}
	}

	/// Instruments the fetch future without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> impl Future<Output = Fut::Output> + use<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}
