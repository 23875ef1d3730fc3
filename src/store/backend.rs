use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{trace, warn};

use crate::error::Result;
use crate::utils::ObjectId;

/// Persistence for compressed objects, keyed by digest.
///
/// Backends never interpret the bytes they hold. Writing an id that is
/// already present must leave the store unchanged or replace it with the
/// identical bytes; content addressing makes either outcome equivalent.
pub trait Backend: Send + Sync {
    fn contains(&self, id: &ObjectId) -> Result<bool>;

    /// `Ok(None)` when nothing is stored under `id`.
    fn read(&self, id: &ObjectId) -> Result<Option<Vec<u8>>>;

    /// Store `compressed` under `id`, all or nothing.
    fn write(&self, id: &ObjectId, compressed: &[u8]) -> Result<()>;
}

/// Loose objects on disk: `<objects>/<2 hex>/<62 hex>`.
#[derive(Debug, Clone)]
pub struct LooseBackend {
    objects_dir: PathBuf,
}

impl LooseBackend {
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        LooseBackend {
            objects_dir: objects_dir.into(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        let (dir_name, file_name) = id.shard();
        self.objects_dir.join(dir_name).join(file_name)
    }
}

impl Backend for LooseBackend {
    fn contains(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.object_path(id).try_exists()?)
    }

    fn read(&self, id: &ObjectId) -> Result<Option<Vec<u8>>> {
        let object_path = self.object_path(id);
        trace!(path = %object_path.display(), "reading loose object");
        match fs::read(&object_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, id: &ObjectId, compressed: &[u8]) -> Result<()> {
        let object_path = self.object_path(id);
        let object_dir = match object_path.parent() {
            Some(dir) => dir.to_path_buf(),
            None => self.objects_dir.clone(),
        };
        fs::create_dir_all(&object_dir)?;

        // Stage next to the target so the rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(&object_dir)?;
        staged.write_all(compressed)?;
        staged.as_file().sync_all()?;

        if let Err(err) = staged.persist(&object_path) {
            // Another writer may have landed the same object first.
            if object_path.exists() {
                warn!(%id, "lost write race, keeping existing object");
                return Ok(());
            }
            return Err(err.error.into());
        }
        Ok(())
    }
}
