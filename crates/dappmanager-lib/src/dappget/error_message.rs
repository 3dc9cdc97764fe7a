//! Human readable diagnostics for a failed search.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::resolve::SearchStats;

/// Summarizes which dependency most likely made the search fail.
///
/// Violation keys carry `name@version` ids; versions are stripped so that
/// repeated failures over the same package pair accumulate whatever versions
/// were involved. Best-effort diagnostics, not a proof the request is
/// unsatisfiable.
pub(super) fn generate_error_message(stats: &SearchStats) -> String {
	/* dependency name -> (violations seen, requesters involved) */
	let mut blame: BTreeMap<String, (u32, BTreeSet<String>)> = BTreeMap::new();
	for (key, count) in &stats.violation_counts {
		let mut parts = key.splitn(3, '#');
		let requester = strip_version(parts.next().unwrap_or_default());
		let dependency = strip_version(parts.next().unwrap_or_default());

		let entry = blame.entry(dependency).or_default();
		entry.0 += count;
		entry.1.insert(requester);
	}

	let checked = format!(
		"Checked {} of {} possible states{}.",
		stats.cases_checked,
		stats.total_cases,
		if stats.timed_out { " before timing out" } else { "" },
	);

	match blame.into_iter().max_by_key(|(_, (count, _))| *count) {
		Some((dependency, (_, requesters))) => {
			let requesters = requesters.into_iter().collect::<Vec<_>>().join(", ");
			format!(
				"Could not find a compatible state. Packages {} require incompatible versions of {}. {}",
				requesters, dependency, checked,
			)
		}
		None => format!("Could not find a compatible state. {}", checked),
	}
}

fn strip_version(id: &str) -> String {
	id.split('@').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod test {
	use super::*;

	fn stats(violations: &[(&str, u32)]) -> SearchStats {
		SearchStats {
			cases_checked: 6,
			total_cases: 8,
			violation_counts: violations.iter().map(|(k, c)| (k.to_string(), *c)).collect(),
			..Default::default()
		}
	}

	#[test]
	fn blames_the_dependency_with_the_most_violations() {
		let message = generate_error_message(&stats(&[
			("dnp-x@1.0.0#dnp-d@2.0.0#^1.0.0", 3),
			("dnp-y@1.0.0#dnp-d@1.0.0#^2.0.0", 2),
			("dnp-x@1.0.0#dnp-e@1.0.0#^1.0.0", 1),
		]));
		assert!(message.contains("incompatible versions of dnp-d"), "{}", message);
		assert!(message.contains("dnp-x, dnp-y"), "{}", message);
	}

	#[test]
	fn reports_the_cases_ratio() {
		let message = generate_error_message(&stats(&[("dnp-x@1.0.0#dnp-d#^1.0.0", 1)]));
		assert!(message.contains("6 of 8"), "{}", message);
	}

	#[test]
	fn mentions_a_timeout() {
		let mut stats = stats(&[("dnp-x@1.0.0#dnp-d#^1.0.0", 1)]);
		stats.timed_out = true;
		assert!(generate_error_message(&stats).contains("timing out"));
	}

	#[test]
	fn survives_an_empty_violation_map() {
		let message = generate_error_message(&stats(&[]));
		assert!(message.contains("Could not find a compatible state"), "{}", message);
	}
}
