//! Budgets applied during a resolve call.

use std::time::Duration;

/// Limits a single resolve call is allowed to spend.
///
/// The defaults are generous enough for real dependency graphs and should
/// only need lowering in tests.
#[derive(Debug, Clone)]
pub struct DappGetOptions {
	/// Wall-clock limit on the state search. Candidate states grow as the
	/// product of every package's version count so this is the real safety
	/// net for pathological graphs.
	pub search_timeout: Duration,
	/// Wall-clock limit on pulling installed packages into the graph.
	/// Running out stops the expansion early instead of failing the resolve.
	pub installed_scan_budget: Duration,
	/// Upper bound on graph cleanup passes before assuming a logic bug.
	pub cleanup_iteration_cap: u32,
}

impl Default for DappGetOptions {
	fn default() -> Self {
		Self {
			search_timeout: Duration::from_secs(10),
			installed_scan_budget: Duration::from_secs(2),
			cleanup_iteration_cap: 1000,
		}
	}
}
