//! In-memory package repository for exercising the resolver in tests.
//!
//! Fixtures are declared with the builder methods and the finished repo is
//! handed to the engine through [`dappmanager::registry::Sources::from_repo`].

use std::collections::BTreeMap;

use dappmanager::registry::dependencies_from_json;
use dappmanager::registry::DependencyMap;
use dappmanager::registry::InstalledPackage;
use dappmanager::registry::InstalledSource;
use dappmanager::registry::Manifest;
use dappmanager::registry::ManifestSource;
use dappmanager::registry::Version;
use dappmanager::registry::VersionRange;
use dappmanager::registry::VersionSource;

/// A declarative package repository implementing every source trait.
#[derive(Debug, Default)]
pub struct TestRepo {
	manifests: BTreeMap<String, BTreeMap<Version, Manifest>>,
	installed: Vec<InstalledPackage>,
}

impl TestRepo {
	pub fn new() -> Self {
		Default::default()
	}

	/// Publishes `name@version` with dependencies given as a JSON object,
	/// e.g. `{"dnp-b": "^1.0.0"}`.
	pub fn package(mut self, name: &str, version: &str, dependencies: &str) -> Self {
		let version = Version::parse(version);
		let manifest = Manifest {
			name: name.to_string(),
			version: version.clone(),
			dependencies: dependencies_from_json(dependencies),
		};
		self.manifests.entry(name.to_string()).or_default().insert(version, manifest);
		self
	}

	/// Marks `name@version` as present on the host. Publish the package
	/// first so its dependency map is known; an unpublished install degrades
	/// to one with no dependencies.
	pub fn installed(mut self, name: &str, version: &str) -> Self {
		let version = Version::parse(version);
		let dependencies = self.manifests.get(name)
			.and_then(|versions| versions.get(&version))
			.map(|manifest| manifest.dependencies.clone())
			.unwrap_or_default();
		self.installed.push(InstalledPackage { name: name.to_string(), version, dependencies });
		self
	}
}

impl VersionSource for TestRepo {
	fn versions(&self, name: &str, range: &VersionRange) -> dappmanager::Result<Vec<Version>> {
		let published: Vec<Version> = self.manifests.get(name)
			.map(|versions| versions.keys().cloned().collect())
			.unwrap_or_default();
		Ok(range.candidate_versions(&published))
	}
}

impl ManifestSource for TestRepo {
	fn dependencies(&self, name: &str, version: &Version) -> dappmanager::Result<DependencyMap> {
		/* An unknown package degrades to no dependencies, the same way a
		 * registry serving a malformed manifest would. */
		Ok(self.manifests.get(name)
			.and_then(|versions| versions.get(version))
			.map(|manifest| manifest.dependencies.clone())
			.unwrap_or_default())
	}
}

impl InstalledSource for TestRepo {
	fn list_installed(&self) -> dappmanager::Result<Vec<InstalledPackage>> {
		Ok(self.installed.clone())
	}
}
