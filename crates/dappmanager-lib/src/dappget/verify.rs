//! Pure validity check for candidate states.

use std::collections::BTreeMap;

use crate::registry::Version;
use crate::registry::VersionRange;

use super::dnp_graph::DnpGraph;

/// The first dependency edge a state fails to satisfy.
#[derive(Debug, Clone)]
pub struct Violation {
	pub requester: String,
	pub requester_version: Version,
	pub dependency: String,
	pub range: VersionRange,
	/// Version the state assigns to the dependency, if any.
	pub assigned: Option<Version>,
}

impl Violation {
	/// Key used to tally repeated failures across the search:
	/// `requester@version#dependency@version#range`.
	pub(super) fn key(&self) -> String {
		let dependency = match &self.assigned {
			Some(v) => format!("{}@{}", self.dependency, v),
			None => self.dependency.clone(),
		};
		format!("{}@{}#{}#{}", self.requester, self.requester_version, dependency, self.range)
	}
}

/// Checks every dependency declared by the packages in `state` against the
/// versions `state` assigns. Returns the first violated edge, or `None` when
/// the state is valid.
///
/// A declared dependency is always mandatory: a dependency missing from the
/// state entirely is a violation.
///
/// # Panics
/// - If `state` assigns a version the graph does not contain.
pub fn verify_state(state: &BTreeMap<String, Version>, graph: &DnpGraph) -> Option<Violation> {
	for (name, version) in state {
		let deps = graph.get(name)
			.and_then(|node| node.versions.get(version))
			.expect("state assigns a version missing from the graph");

		for (dependency, range) in deps {
			let assigned = state.get(dependency);
			let satisfied = match assigned {
				Some(v) => range.satisfies(v),
				None => false,
			};
			if !satisfied {
				return Some(Violation {
					requester: name.clone(),
					requester_version: version.clone(),
					dependency: dependency.clone(),
					range: range.clone(),
					assigned: assigned.cloned(),
				});
			}
		}
	}
	None
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::registry::DependencyMap;

	fn graph() -> DnpGraph {
		let mut graph = DnpGraph::default();
		let deps: DependencyMap = [("dnp-b".to_string(), VersionRange::parse("^1.0.0"))].into_iter().collect();
		graph.node_mut("dnp-a").versions.insert(Version::parse("1.0.0"), deps);
		graph.node_mut("dnp-b").versions.insert(Version::parse("1.2.0"), Default::default());
		graph.node_mut("dnp-b").versions.insert(Version::parse("2.0.0"), Default::default());
		graph
	}

	fn state(entries: &[(&str, &str)]) -> BTreeMap<String, Version> {
		entries.iter().map(|(n, v)| (n.to_string(), Version::parse(v))).collect()
	}

	#[test]
	fn satisfied_state_is_valid() {
		assert!(verify_state(&state(&[("dnp-a", "1.0.0"), ("dnp-b", "1.2.0")]), &graph()).is_none());
	}

	#[test]
	fn out_of_range_dependency_is_reported() {
		let violation = verify_state(&state(&[("dnp-a", "1.0.0"), ("dnp-b", "2.0.0")]), &graph()).unwrap();
		assert_eq!(violation.requester, "dnp-a");
		assert_eq!(violation.dependency, "dnp-b");
		assert_eq!(violation.assigned, Some(Version::parse("2.0.0")));
	}

	#[test]
	fn missing_dependency_is_a_violation() {
		let violation = verify_state(&state(&[("dnp-a", "1.0.0")]), &graph()).unwrap();
		assert_eq!(violation.dependency, "dnp-b");
		assert!(violation.assigned.is_none());
	}

	#[test]
	fn violation_key_carries_both_sides() {
		let violation = verify_state(&state(&[("dnp-a", "1.0.0"), ("dnp-b", "2.0.0")]), &graph()).unwrap();
		assert_eq!(violation.key(), "dnp-a@1.0.0#dnp-b@2.0.0#^1.0.0");
	}
}
