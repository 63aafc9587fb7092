use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Build information of the remote asset catalog.
///
/// Only [`AssetVersion::version`] takes part in cache validity checks, the
/// other fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetVersion {
    /// Release branch e.g. "release-09.10".
    pub branch: String,

    /// Full version string e.g. "release-09.10-shipping-20-2925829".
    pub version: String,

    /// Build number within the branch.
    pub build_version: String,

    pub build_date: DateTime<Utc>,

    /// Version string reported by the game client, used by the game API as
    /// the `X-Riot-ClientVersion` header.
    pub riot_client_version: String,
}

impl AssetVersion {
    /// Whether data built for `self` can stand in for data built for `other`.
    pub fn matches(&self, other: &AssetVersion) -> bool {
        self.version == other.version
    }
}
