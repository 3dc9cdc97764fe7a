//! Orders packages and their candidate versions for the state search.

use crate::registry::Version;

use super::dnp_graph::DnpGraph;
use super::dnp_graph::DnpNode;

/// Orders packages for enumeration.
///
/// Three stable buckets: packages that are neither installed nor requested
/// are the most free and come first, installed packages should move as
/// little as possible, and the requested package anchors the search at the
/// end.
pub(super) fn prioritize_dnps(graph: &DnpGraph) -> Vec<&str> {
	let mut fresh = Vec::new();
	let mut installed = Vec::new();
	let mut requested = Vec::new();

	for (name, node) in graph.iter() {
		if node.is_request {
			requested.push(name.as_str());
		} else if node.is_installed {
			installed.push(name.as_str());
		} else {
			fresh.push(name.as_str());
		}
	}

	fresh.extend(installed);
	fresh.extend(requested);
	fresh
}

/// Candidate versions for one package, in the order the search should try
/// them. `None` means "do not install this package" and only appears, first,
/// for packages that are neither installed nor requested.
pub(super) fn prioritize_versions(node: &DnpNode) -> Vec<Option<Version>> {
	let mut versions: Vec<Version> = node.versions.keys().cloned().collect();

	if node.is_request {
		/* The user wants the newest version satisfying the request. */
		versions.reverse();
		versions.into_iter().map(Some).collect()
	} else if node.is_installed {
		/* Ascending: the version already on the host is the smallest change
		 * and gets tried before any upgrade. */
		versions.into_iter().map(Some).collect()
	} else {
		versions.reverse();
		let mut candidates = vec![None];
		candidates.extend(versions.into_iter().map(Some));
		candidates
	}
}
