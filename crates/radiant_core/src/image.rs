use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Reference to a remotely hosted image.
///
/// The local cache location is derived from the URL path only, so
/// `https://media.valorant-api.com/agents/<id>/displayicon.png` lands at
/// `<root>/agents/<id>/displayicon.png` regardless of host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetImage(Url);

impl AssetImage {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn parse(url: &str) -> Result<Self, url::ParseError> {
        Url::parse(url).map(Self)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Cache path relative to the cache root. Empty, `.` and `..` segments are dropped.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(segments) = self.0.path_segments() {
            for segment in segments {
                if segment.is_empty() || segment == "." || segment == ".." {
                    continue;
                }
                path.push(segment.replace('\\', "_"));
            }
        }

        if path.as_os_str().is_empty() {
            path.push("_root");
        }
        path
    }

    pub fn local_path(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }

    /// Location of the sidecar metadata file, `<cache-path>.json`.
    pub fn metadata_path(&self, root: &Path) -> PathBuf {
        let mut path = self.local_path(root).into_os_string();
        path.push(".json");
        PathBuf::from(path)
    }
}

impl fmt::Display for AssetImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
