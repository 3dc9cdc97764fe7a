//! Graph types shared by the aggregation and search stages.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::registry::DependencyMap;
use crate::registry::Version;

/// One package in the candidate graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnpNode {
	/// This is the package the user asked to change.
	pub is_request: bool,
	/// The package is currently present on the host, whether or not its
	/// version ends up changing.
	pub is_installed: bool,
	/// Viable versions and the dependencies each one declares.
	pub versions: BTreeMap<Version, DependencyMap>,
}

/// Every package involved in a resolve: the request, its transitive
/// dependencies and any installed package dragged in by them.
///
/// Built once per resolve call and read-only during the search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnpGraph {
	dnps: BTreeMap<String, DnpNode>,
}

impl DnpGraph {
	pub fn get(&self, name: &str) -> Option<&DnpNode> {
		self.dnps.get(name)
	}

	pub fn get_mut(&mut self, name: &str) -> Option<&mut DnpNode> {
		self.dnps.get_mut(name)
	}

	/// Returns the node for `name`, creating an empty one if needed.
	pub fn node_mut(&mut self, name: &str) -> &mut DnpNode {
		self.dnps.entry(name.to_string()).or_default()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.dnps.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &DnpNode)> {
		self.dnps.iter()
	}

	pub fn len(&self) -> usize {
		self.dnps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.dnps.is_empty()
	}

	/// Prunes dangling references until the graph settles.
	///
	/// Each pass drops packages left with no viable versions, then drops any
	/// version depending on a package no longer in the graph. Idempotent, so
	/// running it on a settled graph changes nothing.
	///
	/// The pass cap guards against a pruning bug keeping the loop alive, it
	/// is not expected to be reached.
	pub fn cleanup(&mut self, iteration_cap: u32) -> crate::Result<()> {
		for _ in 0..iteration_cap {
			let mut changed = false;

			let empty: Vec<String> = self.dnps.iter()
				.filter(|(_, node)| node.versions.is_empty())
				.map(|(name, _)| name.clone())
				.collect();
			for name in empty {
				log::debug!("Dropping package {} with no viable versions", name);
				self.dnps.remove(&name);
				changed = true;
			}

			let names: BTreeSet<String> = self.dnps.keys().cloned().collect();
			for (name, node) in self.dnps.iter_mut() {
				let dangling: Vec<Version> = node.versions.iter()
					.filter(|(_, deps)| deps.keys().any(|dep| !names.contains(dep)))
					.map(|(version, _)| version.clone())
					.collect();
				for version in dangling {
					log::debug!("Dropping version {}@{} depending on a pruned package", name, version);
					node.versions.remove(&version);
					changed = true;
				}
			}

			if !changed {
				return Ok(());
			}
		}
		Err(crate::Error::CleanupDiverged(iteration_cap))
	}
}
