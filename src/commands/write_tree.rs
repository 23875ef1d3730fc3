use clap::Command;
use std::io::Write;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::ObjectStore;
use crate::utils;

pub fn get_write_tree_command() -> Command {
    Command::new("write-tree").about("Snapshot the directory holding the store as a tree object")
}

/// Snapshot the directory that holds the store, leaving the store out.
pub fn write_tree(config: &StoreConfig, out: &mut impl Write) -> Result<()> {
    let store = ObjectStore::open(config)?;
    let id = utils::write_tree(&store, &config.work_dir(), &[config.root.clone()])?;
    writeln!(out, "{}", id)?;
    Ok(())
}
