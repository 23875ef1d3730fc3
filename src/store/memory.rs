use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::store::Backend;
use crate::utils::ObjectId;

/// HashMap-backed store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Sorted ids of everything stored.
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.read().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Overwrite raw stored bytes. Lets tests plant corrupt objects.
    pub fn insert_raw(&self, id: ObjectId, compressed: Vec<u8>) {
        self.objects.write().insert(id, compressed);
    }
}

impl Backend for MemoryBackend {
    fn contains(&self, id: &ObjectId) -> Result<bool> {
        Ok(self.objects.read().contains_key(id))
    }

    fn read(&self, id: &ObjectId) -> Result<Option<Vec<u8>>> {
        Ok(self.objects.read().get(id).cloned())
    }

    fn write(&self, id: &ObjectId, compressed: &[u8]) -> Result<()> {
        self.objects
            .write()
            .entry(*id)
            .or_insert_with(|| compressed.to_vec());
        Ok(())
    }
}
