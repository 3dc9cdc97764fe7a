use serde::{Serialize, Deserialize};

/// A concrete package version.
///
/// Registry releases carry semver versions. A package referenced directly by
/// its stored content uses the content hash as a pseudo version, which only
/// ever equals itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Version {
	Semver(semver::Version),
	Hash(String),
}

impl Version {
	/// Parses a version string. Anything that is not a semver version is
	/// treated as an opaque content hash, so this cannot fail.
	pub fn parse(version: &str) -> Self {
		let version = version.trim();
		match semver::Version::parse(version) {
			Ok(v) => Version::Semver(v),
			Err(_) => Version::Hash(version.to_string()),
		}
	}

	pub fn as_semver(&self) -> Option<&semver::Version> {
		match self {
			Version::Semver(v) => Some(v),
			Version::Hash(_) => None,
		}
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		match (self, other) {
			(Version::Semver(a), Version::Semver(b)) => a.cmp(b),
			(Version::Hash(a), Version::Hash(b)) => a.cmp(b),
			/* Hashes have no meaningful order against real versions, the
			 * variants only need a stable one to live in ordered maps. */
			(Version::Semver(_), Version::Hash(_)) => std::cmp::Ordering::Less,
			(Version::Hash(_), Version::Semver(_)) => std::cmp::Ordering::Greater,
		}
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl From<String> for Version {
	fn from(value: String) -> Self { Self::parse(&value) }
}

impl From<&str> for Version {
	fn from(value: &str) -> Self { Self::parse(value) }
}

impl From<Version> for String {
	fn from(value: Version) -> Self { value.to_string() }
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Version::Semver(v) => write!(f, "{}", v),
			Version::Hash(h) => write!(f, "{}", h),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test] fn semver_versions_compare_by_precedence() { assert!(Version::parse("1.2.4") < Version::parse("1.2.10")) }
	#[test] fn prerelease_sorts_before_release() { assert!(Version::parse("1.0.0-beta.1") < Version::parse("1.0.0")) }
	#[test] fn non_semver_degrades_to_hash() { assert!(matches!(Version::parse("/ipfs/QmP1nDAPirEgUM5J1BavQrQEjgQUpTN1DXLnQV3t2EoFFT"), Version::Hash(_))) }
	#[test] fn hash_only_equals_itself() { assert_ne!(Version::parse("/ipfs/Qmaaa"), Version::parse("/ipfs/Qmbbb")) }
	#[test] fn identical_hashes_are_equal() { assert_eq!(Version::parse("/ipfs/Qmaaa"), Version::parse("/ipfs/Qmaaa")) }
	#[test] fn display_round_trips() { assert_eq!(Version::parse("1.2.3").to_string(), "1.2.3") }
}
