//! Builds the candidate graph for a resolve call.

use std::collections::HashSet;
use std::collections::VecDeque;
use std::time::Duration;
use std::time::Instant;

use crate::registry::InstalledPackage;
use crate::registry::Sources;
use crate::registry::VersionRange;

use super::dnp_graph::DnpGraph;
use super::DappGetRequest;

/// Expands the request into the full candidate graph: every transitively
/// reachable dependency with all its viable versions, plus any installed
/// package whose dependencies point into the graph.
pub(super) fn aggregate(
	request: &DappGetRequest,
	range: &VersionRange,
	installed: &[InstalledPackage],
	sources: &Sources,
	scan_budget: Duration,
) -> crate::Result<DnpGraph> {
	let mut graph = DnpGraph::default();
	let mut processed = HashSet::<(String, String)>::new();
	let mut queue = VecDeque::<(String, VersionRange)>::new();

	queue.push_back((request.name.clone(), range.clone()));
	aggregate_queue(&mut graph, &mut queue, &mut processed, sources)?;

	if let Some(node) = graph.get_mut(&request.name) {
		node.is_request = true;
	}

	/* Installed packages depending on a graph member have a say in the
	 * final state, so they join the graph with every version they could
	 * move to. Adding one can make another qualify, hence the fixpoint
	 * loop. Discovery is an optimisation: running out of budget stops it
	 * early with a partial graph instead of failing the resolve. */
	let deadline = Instant::now() + scan_budget;
	let mut expanded = HashSet::<String>::new();
	'scan: loop {
		let mut changed = false;
		for dnp in installed {
			/* The requested package is pinned by the request range, its
			 * installed state must not widen the candidates. */
			if dnp.name == request.name || expanded.contains(&dnp.name) {
				continue;
			}
			if !dnp.dependencies.keys().any(|dep| graph.contains(dep)) {
				continue;
			}

			expanded.insert(dnp.name.clone());
			changed = true;

			queue.push_back((dnp.name.clone(), VersionRange::at_least(&dnp.version)));
			aggregate_queue(&mut graph, &mut queue, &mut processed, sources)?;

			let node = graph.node_mut(&dnp.name);
			node.is_installed = true;
			node.versions.entry(dnp.version.clone()).or_insert_with(|| dnp.dependencies.clone());

			if Instant::now() >= deadline {
				log::warn!("Installed package scan ran out of budget, continuing with a partial graph");
				break 'scan;
			}
		}
		if !changed {
			break;
		}
	}

	/* Role flags, not candidates: a package already on the host is marked
	 * installed even when only the request dragged it in. */
	for dnp in installed {
		if let Some(node) = graph.get_mut(&dnp.name) {
			node.is_installed = true;
		}
	}

	Ok(graph)
}

/// Drains the worklist, fetching versions and their dependency maps and
/// queueing every newly referenced package.
fn aggregate_queue(
	graph: &mut DnpGraph,
	queue: &mut VecDeque<(String, VersionRange)>,
	processed: &mut HashSet<(String, String)>,
	sources: &Sources,
) -> crate::Result<()> {
	while let Some((name, range)) = queue.pop_front() {
		/* Dedup on name plus range: a dependency cycle revisits a pair that
		 * is already processed and stops here. */
		if !processed.insert((name.clone(), range.to_string())) {
			continue;
		}

		let versions = sources.versions.versions(&name, &range)?;
		log::trace!("Package {} has {} versions matching {}", name, versions.len(), range);

		for version in versions {
			let known = graph.get(&name).map_or(false, |node| node.versions.contains_key(&version));
			if known {
				continue;
			}
			let deps = sources.manifests.dependencies(&name, &version)?;
			for (dep_name, dep_range) in &deps {
				queue.push_back((dep_name.clone(), dep_range.clone()));
			}
			graph.node_mut(&name).versions.insert(version, deps);
		}

		/* A node with no matching versions still has to exist so cleanup can
		 * prune it together with whatever depends on it. */
		graph.node_mut(&name);
	}
	Ok(())
}
