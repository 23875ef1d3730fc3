use std::{fmt, str::FromStr};

use crate::error::{ObjectError, Result};
use crate::utils::{DIGEST_LEN, ObjectId, ObjectKind};

/// Filesystem kind of a tree entry, stored as its git mode token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryMode {
    Regular,
    Executable,
    Symlink,
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
            EntryMode::Symlink => "120000",
            EntryMode::Directory => "40000",
        }
    }

    /// Accepts the zero-padded `040000` some tools write for directories.
    pub fn from_token(token: &[u8]) -> Option<Self> {
        match token {
            b"100644" => Some(EntryMode::Regular),
            b"100755" => Some(EntryMode::Executable),
            b"120000" => Some(EntryMode::Symlink),
            b"40000" | b"040000" => Some(EntryMode::Directory),
            _ => None,
        }
    }

    /// Kind of object an entry with this mode points at.
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            EntryMode::Directory => ObjectKind::Tree,
            _ => ObjectKind::Blob,
        }
    }
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryMode {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self> {
        EntryMode::from_token(s.as_bytes())
            .ok_or_else(|| ObjectError::invalid_entry(s.as_bytes(), "unrecognized mode"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: Vec<u8>, // raw bytes, never contains '/' or NUL
    pub id: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: EntryMode, name: impl Into<Vec<u8>>, id: ObjectId) -> Self {
        TreeEntry {
            mode,
            name: name.into(),
            id,
        }
    }

    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut entry = Vec::with_capacity(self.mode.as_str().len() + self.name.len() + 2 + DIGEST_LEN);
        self.write_to(&mut entry);
        entry
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mode.as_str().as_bytes());
        out.push(b' ');

        out.extend_from_slice(&self.name);
        out.push(0); // NULL separator

        out.extend_from_slice(self.id.as_bytes());
    }
}

/// Concatenate entries into a tree body. Callers sort first.
pub fn encode_tree_body(entries: &[TreeEntry]) -> Vec<u8> {
    let mut body = Vec::new();
    for entry in entries {
        entry.write_to(&mut body);
    }
    body
}

/// Parse a tree body back into entries, in stored order.
///
/// Names must be strictly ascending byte-wise, so a body with duplicate or
/// shuffled entries is `MalformedObject`.
pub fn parse_tree_entries(body: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let offset = body.len() - rest.len();

        let space = rest
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| truncated(offset, "mode"))?;
        let mode = EntryMode::from_token(&rest[..space]).ok_or_else(|| {
            ObjectError::malformed(format!(
                "unknown mode {:?} at tree offset {}",
                String::from_utf8_lossy(&rest[..space]),
                offset
            ))
        })?;
        rest = &rest[space + 1..];

        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| truncated(offset, "name"))?;
        if nul == 0 {
            return Err(ObjectError::malformed(format!("empty entry name at tree offset {}", offset)));
        }
        let name = rest[..nul].to_vec();
        rest = &rest[nul + 1..];

        if entries.last().is_some_and(|prev: &TreeEntry| prev.name >= name) {
            return Err(ObjectError::malformed(format!(
                "entry {:?} at tree offset {} is out of order",
                String::from_utf8_lossy(&name),
                offset
            )));
        }

        if rest.len() < DIGEST_LEN {
            return Err(truncated(offset, "digest"));
        }
        let (raw_id, tail) = rest.split_at(DIGEST_LEN);
        let id = ObjectId::from_slice(raw_id).ok_or_else(|| truncated(offset, "digest"))?;
        rest = tail;

        entries.push(TreeEntry { mode, name, id });
    }

    Ok(entries)
}

fn truncated(offset: usize, field: &str) -> ObjectError {
    ObjectError::malformed(format!("tree entry at offset {} truncated in {}", offset, field))
}
