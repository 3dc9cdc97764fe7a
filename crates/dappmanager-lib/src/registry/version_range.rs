use serde::{Serialize, Deserialize};

use super::Version;

/// A constraint on the versions of one package.
///
/// Ranges arrive in manifests written by package authors so parsing is
/// lenient: anything that is not a wildcard, an exact version or a semver
/// range is treated as a content hash accepting only itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionRange {
	/// Matches every version, including content hashes.
	Any,
	/// A bare version only accepts exactly that version.
	Exact(semver::Version),
	Range(semver::VersionReq),
	Hash(String),
}

impl VersionRange {
	/// Parses a range string, degrading anything unrecognised to a content
	/// hash pseudo range. A range mentioning `latest` is wildcard, whatever
	/// else it says.
	pub fn parse(range: &str) -> Self {
		let range = range.trim();
		if range.is_empty() || range == "*" || range.contains("latest") {
			return VersionRange::Any;
		}
		if let Ok(v) = semver::Version::parse(range) {
			return VersionRange::Exact(v);
		}
		if let Ok(req) = semver::VersionReq::parse(range) {
			return VersionRange::Range(req);
		}
		VersionRange::Hash(range.to_string())
	}

	/// Parsing for user supplied input, where junk must be rejected instead
	/// of degraded.
	pub fn parse_strict(range: &str) -> crate::Result<Self> {
		let parsed = Self::parse(range);
		if let VersionRange::Hash(h) = &parsed {
			if !looks_like_content_hash(h) {
				return Err(crate::Error::Parse(format!("invalid version range: {}", range)));
			}
		}
		Ok(parsed)
	}

	/// Range accepting `version` and anything newer.
	pub fn at_least(version: &Version) -> Self {
		match version {
			Version::Semver(v) => {
				let req = semver::VersionReq::parse(&format!(">={}", v))
					.expect("a concrete version always forms a valid range");
				VersionRange::Range(req)
			}
			Version::Hash(h) => VersionRange::Hash(h.clone()),
		}
	}

	pub fn satisfies(&self, version: &Version) -> bool {
		match self {
			VersionRange::Any => true,
			VersionRange::Exact(want) => matches!(version, Version::Semver(v) if v == want),
			VersionRange::Range(req) => matches!(version, Version::Semver(v) if req.matches(v)),
			VersionRange::Hash(want) => matches!(version, Version::Hash(h) if h == want),
		}
	}

	/// Expands the range into the concrete candidates a version source
	/// should return. Exact and hash ranges name their single candidate
	/// directly without consulting the published list; real ranges filter it.
	pub fn candidate_versions(&self, published: &[Version]) -> Vec<Version> {
		match self {
			VersionRange::Exact(v) => vec![Version::Semver(v.clone())],
			VersionRange::Hash(h) => vec![Version::Hash(h.clone())],
			_ => published.iter().filter(|v| self.satisfies(v)).cloned().collect(),
		}
	}
}

fn looks_like_content_hash(range: &str) -> bool {
	range.starts_with("/ipfs/") || range.starts_with("ipfs/") || range.starts_with("Qm")
}

impl From<String> for VersionRange {
	fn from(value: String) -> Self { Self::parse(&value) }
}

impl From<&str> for VersionRange {
	fn from(value: &str) -> Self { Self::parse(value) }
}

impl From<VersionRange> for String {
	fn from(value: VersionRange) -> Self { value.to_string() }
}

impl std::fmt::Display for VersionRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			VersionRange::Any => write!(f, "*"),
			VersionRange::Exact(v) => write!(f, "{}", v),
			VersionRange::Range(req) => write!(f, "{}", req),
			VersionRange::Hash(h) => write!(f, "{}", h),
		}
	}
}
