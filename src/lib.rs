//! A small content-addressed object store in the style of git's loose
//! objects: blobs and trees, SHA-256 addressed, zlib compressed.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod utils;

pub use cli::cli;
pub use config::StoreConfig;
pub use error::{ObjectError, Result};
pub use store::{Backend, LooseBackend, MemoryBackend, ObjectStore, TreeListing};
pub use utils::{EntryMode, Object, ObjectId, ObjectKind, TreeEntry};
