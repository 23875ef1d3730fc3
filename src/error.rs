use std::path::PathBuf;

use crate::utils::{ObjectId, ObjectKind};

/// Errors from encoding, storing and reading objects.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    /// No object is stored under this digest.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The stored bytes are not a valid zlib stream.
    #[error("corrupt data{}: {source}", fmt_id(.id))]
    CorruptData {
        id: Option<ObjectId>,
        #[source]
        source: std::io::Error,
    },

    /// Decompressed bytes violate the header/body layout.
    #[error("malformed object: {reason}")]
    MalformedObject { reason: String },

    /// Tree builder input with a bad name or mode.
    #[error("invalid tree entry {name:?}: {reason}")]
    InvalidEntry { name: String, reason: String },

    /// A tree was requested but the object has another kind.
    #[error("object {id} is a {kind}, not a tree")]
    NotATree { id: ObjectId, kind: ObjectKind },

    /// Text that does not parse as a hex digest.
    #[error("invalid object id: {0:?}")]
    InvalidObjectId(String),

    /// The store root has no objects directory.
    #[error("not a vit store (missing {})", .0.display())]
    StoreNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ObjectError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ObjectError::MalformedObject {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_entry(name: &[u8], reason: impl Into<String>) -> Self {
        ObjectError::InvalidEntry {
            name: String::from_utf8_lossy(name).into_owned(),
            reason: reason.into(),
        }
    }
}

fn fmt_id(id: &Option<ObjectId>) -> String {
    match id {
        Some(id) => format!(" in {}", id),
        None => String::new(),
    }
}

/// Result alias for object operations.
pub type Result<T> = std::result::Result<T, ObjectError>;
