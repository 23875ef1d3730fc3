//! Content-addressed object store.
//!
//! Objects are encoded as `"<kind> <len>\0" + body`, addressed by the SHA-256
//! of that encoding, zlib-compressed and handed to a [`Backend`]. A `put` of
//! content that is already present writes nothing.

pub mod backend;
pub mod memory;
pub mod tree;

pub use backend::{Backend, LooseBackend};
pub use memory::MemoryBackend;
pub use tree::TreeListing;

use tracing::{debug, trace};

use crate::config::{DEFAULT_COMPRESSION, StoreConfig};
use crate::error::{ObjectError, Result};
use crate::utils::{self, Object, ObjectId, ObjectKind};

pub struct ObjectStore<B: Backend> {
    backend: B,
    compression_level: u32,
}

impl ObjectStore<LooseBackend> {
    /// Open the loose-object store described by `config`.
    ///
    /// The objects directory must already exist (see `commands::init`).
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let objects_dir = config.objects_dir();
        if !objects_dir.is_dir() {
            return Err(ObjectError::StoreNotFound(objects_dir));
        }
        Ok(ObjectStore::with_backend(LooseBackend::new(objects_dir))
            .compression(config.compression_level))
    }
}

impl ObjectStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        ObjectStore::with_backend(MemoryBackend::new())
    }
}

impl<B: Backend> ObjectStore<B> {
    pub fn with_backend(backend: B) -> Self {
        ObjectStore {
            backend,
            compression_level: DEFAULT_COMPRESSION,
        }
    }

    /// zlib level for new objects. Levels above 9 are clamped to 9.
    pub fn compression(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store an object and return its digest.
    ///
    /// Idempotent: when the digest is already present nothing is compressed
    /// or written.
    pub fn put(&self, kind: ObjectKind, body: &[u8]) -> Result<ObjectId> {
        let encoded = utils::encode(kind, body);
        let id = utils::digest(&encoded);

        if self.backend.contains(&id)? {
            debug!(%id, %kind, "object already stored");
            return Ok(id);
        }

        let compressed = utils::compress(&encoded, self.compression_level)?;
        self.backend.write(&id, &compressed)?;
        debug!(%id, %kind, size = body.len(), stored = compressed.len(), "stored object");
        Ok(id)
    }

    pub fn put_object(&self, object: &Object) -> Result<ObjectId> {
        self.put(object.kind, &object.body)
    }

    /// Fetch and decode the object stored under `id`.
    pub fn get(&self, id: &ObjectId) -> Result<Object> {
        let compressed = self
            .backend
            .read(id)?
            .ok_or(ObjectError::ObjectNotFound(*id))?;
        trace!(%id, stored = compressed.len(), "read object");

        let encoded = utils::decompress(&compressed).map_err(|err| match err {
            ObjectError::CorruptData { source, .. } => ObjectError::CorruptData {
                id: Some(*id),
                source,
            },
            other => other,
        })?;
        Object::decode(&encoded)
    }

    pub fn contains(&self, id: &ObjectId) -> Result<bool> {
        self.backend.contains(id)
    }
}
