use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use super::Version;
use super::VersionRange;

/// Dependencies declared by one package version: package name to the range
/// of versions it accepts. May be empty.
///
/// Ranges sanitize themselves on deserialization ([`VersionRange::parse`]),
/// so a map read from a manifest never holds a `latest` literal.
pub type DependencyMap = BTreeMap<String, VersionRange>;

/// The package descriptor published to the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
	pub name: String,
	pub version: Version,
	#[serde(default)]
	pub dependencies: DependencyMap,
}

impl Manifest {
	pub fn from_json(raw: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}
}

/// Parses a dependency map from its wire form.
///
/// Dependency declarations are untrusted external input: a document that is
/// not a JSON object of name to range degrades to no dependencies rather
/// than failing the whole resolve.
pub fn dependencies_from_json(raw: &str) -> DependencyMap {
	match serde_json::from_str::<DependencyMap>(raw) {
		Ok(dependencies) => dependencies,
		Err(e) => {
			log::warn!("Discarding malformed dependency map: {}", e);
			DependencyMap::new()
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn dependency_map_parses_ranges() {
		let deps = dependencies_from_json(r#"{"dnp-b": "^1.0.0"}"#);
		assert_eq!(deps.get("dnp-b"), Some(&VersionRange::parse("^1.0.0")));
	}

	#[test]
	fn latest_is_sanitized_on_the_way_in() {
		let deps = dependencies_from_json(r#"{"dnp-b": "latest"}"#);
		assert_eq!(deps.get("dnp-b"), Some(&VersionRange::Any));
	}

	#[test]
	fn malformed_map_degrades_to_empty() {
		assert!(dependencies_from_json("not json").is_empty());
		assert!(dependencies_from_json("[1, 2]").is_empty());
	}

	#[test]
	fn manifest_parses_with_missing_dependencies() {
		let manifest = Manifest::from_json(r#"{"name": "dnp-a.dnp.dappnode.eth", "version": "0.2.0"}"#).unwrap();
		assert_eq!(manifest.version, Version::parse("0.2.0"));
		assert!(manifest.dependencies.is_empty());
	}
}
