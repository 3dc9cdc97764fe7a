//! Types describing packages as the registry publishes them, and the
//! sources a resolve call reads them from.

mod version;
pub use version::Version;

mod version_range;
pub use version_range::VersionRange;

mod manifest;
pub use manifest::Manifest;
pub use manifest::DependencyMap;
pub use manifest::dependencies_from_json;

mod sources;
pub use sources::VersionSource;
pub use sources::ManifestSource;
pub use sources::InstalledSource;
pub use sources::InstalledPackage;
pub use sources::Sources;
