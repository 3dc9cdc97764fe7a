//! Dependency resolution for package installs.
//!
//! Given a requested package and the packages currently installed, computes
//! one consistent assignment of exactly one version to every package
//! involved: the request, its transitive dependencies and any installed
//! package that transitively depends on them.
//!
//! # Usage
//! 1. Snapshot the collaborators into a [`Sources`].
//! 1. Call [`resolve`] with a [`DappGetRequest`] and [`DappGetOptions`].
//! 1. On [`DappGetResult::Solved`] install the versions in the returned
//! state; [`DappGetSolution::changed_packages()`] lists what actually moves.
//! 1. On [`DappGetResult::Unsolvable`] surface the message to the user; the
//! attached [`SearchStats`] tell whether the search space was exhausted or
//! the search timed out with space remaining.
//!
//! The engine is a pure function of the request and the three sources: it
//! owns no state and two calls with identical inputs return identical
//! states.

use std::collections::BTreeMap;

use crate::config::DappGetOptions;
use crate::registry::InstalledPackage;
use crate::registry::Sources;
use crate::registry::Version;
use crate::registry::VersionRange;

mod dnp_graph;
pub use dnp_graph::DnpGraph;
pub use dnp_graph::DnpNode;

mod aggregate;
mod prioritize;
mod resolve;
pub use resolve::SearchStats;
mod verify;
pub use verify::verify_state;
pub use verify::Violation;
mod error_message;

/// A package install or update the user is asking for.
#[derive(Debug, Default, Clone)]
pub struct DappGetRequest {
	pub name: String,
	/// Semver range, exact version or content hash.
	pub version_range: String,
}

/// Outcome of a resolve call whose inputs were well formed.
#[derive(Debug)]
pub enum DappGetResult {
	/// A state satisfying every dependency was found.
	Solved(DappGetSolution),
	/// No tried state was consistent. Expected for impossible requests, not
	/// an engine error, so it is a variant and not an `Err`.
	Unsolvable {
		message: String,
		stats: SearchStats,
	},
}

/// The version assignment the search settled on.
#[derive(Debug, Clone)]
pub struct DappGetSolution {
	/// Chosen version for every package taking part. Packages resolved to
	/// "do not install" are simply not present.
	pub state: BTreeMap<String, Version>,
}

impl DappGetSolution {
	/// Packages whose version differs from the installed snapshot: the work
	/// an installer actually has to perform.
	pub fn changed_packages(&self, installed: &[InstalledPackage]) -> Vec<(String, Version)> {
		self.state.iter()
			.filter(|(name, version)| {
				installed.iter()
					.find(|dnp| &dnp.name == *name)
					.map_or(true, |dnp| &dnp.version != *version)
			})
			.map(|(name, version)| (name.clone(), version.clone()))
			.collect()
	}
}

/// Resolves `request` against the given sources.
///
/// `Err` is reserved for malformed input and failing collaborators; an
/// unsatisfiable request is the `Ok(DappGetResult::Unsolvable)` variant.
pub fn resolve(request: &DappGetRequest, sources: &Sources, options: &DappGetOptions) -> crate::Result<DappGetResult> {
	if request.name.is_empty() {
		return Err(crate::Error::Validation("request is missing a package name".to_string()));
	}
	let range = VersionRange::parse_strict(&request.version_range)?;

	let installed = sources.installed.list_installed()?;

	let mut graph = aggregate::aggregate(request, &range, &installed, sources, options.installed_scan_budget)?;
	log::debug!("Aggregated {} packages for request {}@{}", graph.len(), request.name, range);

	if let Err(e) = graph.cleanup(options.cleanup_iteration_cap) {
		/* The cap is a safety net against a pruning bug. Search whatever the
		 * graph holds rather than refusing outright; the verifier still
		 * rejects states touching a dangling reference. */
		log::warn!("Graph cleanup did not settle: {}", e);
	}

	if graph.get(&request.name).map_or(true, |node| node.versions.is_empty()) {
		return Err(crate::Error::Validation(
			format!("no version of {} matches {}", request.name, request.version_range),
		));
	}

	match resolve::resolve_state(&graph, options.search_timeout) {
		resolve::StateSearchOutcome::Valid(state) => Ok(DappGetResult::Solved(DappGetSolution { state })),
		resolve::StateSearchOutcome::Exhausted(stats) => {
			let message = error_message::generate_error_message(&stats);
			log::debug!("Request {}@{} is unsolvable: {}", request.name, range, message);
			Ok(DappGetResult::Unsolvable { message, stats })
		}
	}
}

/// Shortcut for callers that explicitly asked to skip resolution: the
/// literal requested version becomes the whole state and dependencies are
/// not checked. The request must name a concrete version or content hash.
pub fn resolve_only(request: &DappGetRequest) -> crate::Result<DappGetSolution> {
	let version = match VersionRange::parse_strict(&request.version_range)? {
		VersionRange::Exact(v) => Version::Semver(v),
		VersionRange::Hash(h) => Version::Hash(h),
		_ => return Err(crate::Error::Validation(
			format!("cannot skip resolution for version range {}", request.version_range),
		)),
	};

	let mut state = BTreeMap::new();
	state.insert(request.name.clone(), version);
	Ok(DappGetSolution { state })
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn resolve_only_takes_the_literal_version() {
		let request = DappGetRequest { name: "dnp-a".to_string(), version_range: "1.2.3".to_string() };
		let solution = resolve_only(&request).unwrap();
		assert_eq!(solution.state.get("dnp-a"), Some(&Version::parse("1.2.3")));
	}

	#[test]
	fn resolve_only_rejects_real_ranges() {
		let request = DappGetRequest { name: "dnp-a".to_string(), version_range: "^1.2.3".to_string() };
		assert!(resolve_only(&request).is_err());
	}

	#[test]
	fn changed_packages_skips_untouched_installs() {
		let solution = DappGetSolution {
			state: [
				("dnp-a".to_string(), Version::parse("2.0.0")),
				("dnp-b".to_string(), Version::parse("1.0.0")),
			].into_iter().collect(),
		};
		let installed = vec![InstalledPackage {
			name: "dnp-b".to_string(),
			version: Version::parse("1.0.0"),
			dependencies: Default::default(),
		}];

		assert_eq!(solution.changed_packages(&installed), vec![("dnp-a".to_string(), Version::parse("2.0.0"))]);
	}
}
