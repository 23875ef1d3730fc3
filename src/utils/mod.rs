pub mod compression;
pub mod digest;
pub mod file_util;
pub mod object;
pub mod tree_entry;

pub use compression::*;
pub use digest::*;
pub use file_util::*;
pub use object::*;
pub use tree_entry::*;
