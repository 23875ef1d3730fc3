use tracing::debug;

use crate::error::{ObjectError, Result};
use crate::store::{Backend, ObjectStore};
use crate::utils::{ObjectId, ObjectKind, TreeEntry, encode_tree_body, parse_tree_entries};

/// Result of `read_tree`: full entries or just their names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeListing {
    Entries(Vec<TreeEntry>),
    Names(Vec<Vec<u8>>),
}

impl TreeListing {
    pub fn len(&self) -> usize {
        match self {
            TreeListing::Entries(entries) => entries.len(),
            TreeListing::Names(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<&[u8]> {
        match self {
            TreeListing::Entries(entries) => entries.iter().map(|e| e.name.as_slice()).collect(),
            TreeListing::Names(names) => names.iter().map(Vec::as_slice).collect(),
        }
    }
}

/// A single path component: non-empty, no NUL, no `/`, not `.` or `..`.
pub(crate) fn validate_name(name: &[u8]) -> Result<()> {
    if name.is_empty() {
        return Err(ObjectError::invalid_entry(name, "empty name"));
    }
    if name.contains(&0) {
        return Err(ObjectError::invalid_entry(name, "name contains a NUL byte"));
    }
    if name.contains(&b'/') {
        return Err(ObjectError::invalid_entry(name, "name contains a path separator"));
    }
    if name == b"." || name == b".." {
        return Err(ObjectError::invalid_entry(name, "name is a relative path component"));
    }
    Ok(())
}

/// Validate and sort entries into canonical tree order.
///
/// Names compare byte-wise, so `"B" < "a"` and `"a" < "a.txt" < "ab"`.
pub fn canonical_entries(entries: impl IntoIterator<Item = TreeEntry>) -> Result<Vec<TreeEntry>> {
    let mut entries: Vec<TreeEntry> = entries.into_iter().collect();
    for entry in &entries {
        validate_name(&entry.name)?;
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if let Some(pair) = entries.windows(2).find(|pair| pair[0].name == pair[1].name) {
        return Err(ObjectError::invalid_entry(&pair[0].name, "duplicate name in tree"));
    }
    Ok(entries)
}

impl<B: Backend> ObjectStore<B> {
    /// Build and store a tree object from child entries, in any order.
    ///
    /// Children are referenced by digest only; they do not have to be
    /// present in this store.
    pub fn build_tree(&self, entries: impl IntoIterator<Item = TreeEntry>) -> Result<ObjectId> {
        let entries = canonical_entries(entries)?;
        let body = encode_tree_body(&entries);
        let id = self.put(ObjectKind::Tree, &body)?;
        debug!(%id, entries = entries.len(), "built tree");
        Ok(id)
    }

    /// Read one level of a tree. Entries come back in stored (sorted) order.
    pub fn read_tree(&self, id: &ObjectId, name_only: bool) -> Result<TreeListing> {
        let entries = self.tree_entries(id)?;
        if name_only {
            Ok(TreeListing::Names(entries.into_iter().map(|e| e.name).collect()))
        } else {
            Ok(TreeListing::Entries(entries))
        }
    }

    pub fn tree_entries(&self, id: &ObjectId) -> Result<Vec<TreeEntry>> {
        let object = self.get(id)?;
        if object.kind != ObjectKind::Tree {
            return Err(ObjectError::NotATree {
                id: *id,
                kind: object.kind,
            });
        }
        parse_tree_entries(&object.body)
    }
}
