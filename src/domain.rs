use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding the meme images, relative to the project root.
pub const MEME_DIR: &str = "jollyta/memes";
pub const PUBLIC_MEME_DIR: &str = "public/memes";
pub const BUILD_DIR: &str = "build";
pub const MANIFEST_FILE: &str = "src/lib/memeList.json";

/// Environment variable set by GitHub Actions runners.
pub const CI_ENV_VAR: &str = "GITHUB_ACTIONS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirPair {
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub files: usize,
    pub dirs: usize,
}

/// Fixed locations of everything the build helpers read and write,
/// resolved against a single project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meme_dir(&self) -> PathBuf {
        self.root.join(MEME_DIR)
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// The source/destination pairs copied into the build output.
    pub fn copy_pairs(&self) -> [DirPair; 2] {
        [MEME_DIR, PUBLIC_MEME_DIR].map(|rel| DirPair {
            source: self.root.join(rel),
            destination: self.root.join(BUILD_DIR).join(rel),
        })
    }

    /// Whether we're running under CI. Read for compatibility with tooling
    /// that sets it; nothing branches on it.
    pub fn is_ci() -> bool {
        is_ci_value(std::env::var(CI_ENV_VAR).ok().as_deref())
    }
}

fn is_ci_value(value: Option<&str>) -> bool {
    value == Some("true")
}
