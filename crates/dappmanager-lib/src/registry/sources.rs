use serde::{Serialize, Deserialize};

use super::DependencyMap;
use super::Version;
use super::VersionRange;

/// Enumerates the concrete versions of a package matching a range.
pub trait VersionSource {
	/// Must not fail for a syntactically valid range. Exact and hash ranges
	/// name their single candidate themselves; implementations can share the
	/// rules through [`VersionRange::candidate_versions`].
	fn versions(&self, name: &str, range: &VersionRange) -> crate::Result<Vec<Version>>;
}

/// Fetches the dependency map a package version declares.
pub trait ManifestSource {
	/// A missing or malformed manifest degrades to an empty map, it is not
	/// an error.
	fn dependencies(&self, name: &str, version: &Version) -> crate::Result<DependencyMap>;
}

/// Snapshot of the packages currently present on the host.
pub trait InstalledSource {
	fn list_installed(&self) -> crate::Result<Vec<InstalledPackage>>;
}

/// One installed package with the dependencies it was installed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
	pub name: String,
	pub version: Version,
	#[serde(default)]
	pub dependencies: DependencyMap,
}

/// The collaborator set a resolve call reads from.
///
/// Built per call so concurrent resolves and tests never share state.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
	pub versions: &'a dyn VersionSource,
	pub manifests: &'a dyn ManifestSource,
	pub installed: &'a dyn InstalledSource,
}

impl<'a> Sources<'a> {
	/// Builds the set from one object implementing all three traits.
	pub fn from_repo<R>(repo: &'a R) -> Self
	where
		R: VersionSource + ManifestSource + InstalledSource,
	{
		Self {
			versions: repo,
			manifests: repo,
			installed: repo,
		}
	}
}
