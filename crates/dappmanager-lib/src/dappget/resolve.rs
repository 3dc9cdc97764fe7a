//! Exhaustive search for a valid state.

use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

use crate::registry::Version;

use super::dnp_graph::DnpGraph;
use super::prioritize;
use super::verify;

/// Counters describing a finished or abandoned search. Returned with every
/// failure so callers can tell an exhausted search space from a timeout.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
	/// States generated and verified.
	pub cases_checked: u64,
	/// Product of every candidate list length, saturating at `u64::MAX`.
	pub total_cases: u64,
	/// How often each dependency edge was seen violated, keyed
	/// `requester@version#dependency@version#range`.
	pub violation_counts: BTreeMap<String, u32>,
	pub elapsed: Duration,
	/// The deadline passed with cases left to try.
	pub timed_out: bool,
}

pub(super) enum StateSearchOutcome {
	Valid(BTreeMap<String, Version>),
	Exhausted(SearchStats),
}

/// Enumerates candidate states in priority order and returns the first one
/// the verifier accepts.
///
/// The search is a plain linear scan: the result is the first valid state in
/// the documented order, not an optimal one, which is what makes the whole
/// resolve deterministic.
pub(super) fn resolve_state(graph: &DnpGraph, timeout: Duration) -> StateSearchOutcome {
	let order = prioritize::prioritize_dnps(graph);
	let candidates: Vec<(&str, Vec<Option<Version>>)> = order.into_iter()
		.map(|name| {
			let node = graph.get(name).expect("prioritized package missing from the graph");
			(name, prioritize::prioritize_versions(node))
		})
		.collect();

	let total_cases = candidates.iter()
		.fold(1u64, |product, (_, list)| product.saturating_mul(list.len() as u64));
	log::debug!("Searching {} candidate states across {} packages", total_cases, candidates.len());

	let started = Instant::now();
	let deadline = started + timeout;
	let mut stats = SearchStats { total_cases, ..Default::default() };

	/* Odometer over the candidate lists, the last package varies fastest. */
	let mut digits = vec![0usize; candidates.len()];
	loop {
		let state: BTreeMap<String, Version> = candidates.iter()
			.zip(&digits)
			.filter_map(|((name, list), digit)| list[*digit].clone().map(|version| (name.to_string(), version)))
			.collect();

		stats.cases_checked += 1;
		match verify::verify_state(&state, graph) {
			None => {
				stats.elapsed = started.elapsed();
				log::debug!("Found a valid state after {} of {} cases", stats.cases_checked, stats.total_cases);
				return StateSearchOutcome::Valid(state);
			}
			Some(violation) => {
				*stats.violation_counts.entry(violation.key()).or_default() += 1;
			}
		}

		if stats.cases_checked >= stats.total_cases || !increment(&mut digits, &candidates) {
			stats.elapsed = started.elapsed();
			return StateSearchOutcome::Exhausted(stats);
		}
		if Instant::now() >= deadline {
			stats.elapsed = started.elapsed();
			stats.timed_out = true;
			log::warn!("State search timed out after {} of {} cases", stats.cases_checked, stats.total_cases);
			return StateSearchOutcome::Exhausted(stats);
		}
	}
}

/// Advances the odometer by one, carrying from the last digit towards the
/// first. Returns false once every digit has wrapped.
fn increment(digits: &mut [usize], candidates: &[(&str, Vec<Option<Version>>)]) -> bool {
	for i in (0..digits.len()).rev() {
		digits[i] += 1;
		if digits[i] < candidates[i].1.len() {
			return true;
		}
		digits[i] = 0;
	}
	false
}
