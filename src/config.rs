use std::path::{Path, PathBuf};

pub const DEFAULT_DIR_NAME: &str = ".vit";
pub const DEFAULT_COMPRESSION: u32 = 6;

/// Where the store lives and how objects are compressed.
///
/// The binary fills this from `--vit-dir` / `VIT_DIR` and
/// `--compression` / `VIT_COMPRESSION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub compression_level: u32,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        StoreConfig {
            root: root.into(),
            compression_level: DEFAULT_COMPRESSION,
        }
    }

    /// Store rooted at `<dir>/.vit`.
    pub fn in_dir(dir: &Path) -> Self {
        StoreConfig::new(dir.join(DEFAULT_DIR_NAME))
    }

    /// zlib level for new objects. Levels above 9 are clamped to 9.
    pub fn with_compression(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.root.join("objects")
    }

    /// Directory the store belongs to, i.e. the parent of the root.
    pub fn work_dir(&self) -> PathBuf {
        match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DIR_NAME)
    }
}
