// self
use crate::obs::WhoamiOutcome;

/// Records a fetch outcome via the global metrics recorder (when enabled).
pub fn record_whoami_outcome(outcome: WhoamiOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("oauth2_younility_whoami_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_outcome_is_safe_without_a_recorder() {
		record_whoami_outcome(WhoamiOutcome::Failure);
	}
}
