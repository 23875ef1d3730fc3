use clap::{Arg, Command};
use std::{io::Write, path::Path};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::ObjectStore;
use crate::utils::{self, ObjectId};

pub fn get_read_tree_command() -> Command {
    Command::new("read-tree")
        .about("Write a tree object out into a directory")
        .arg(Arg::new("tree").required(true).help("Tree id"))
        .arg(Arg::new("dest").required(true).help("Destination directory"))
        .arg_required_else_help(true)
}

pub fn read_tree(config: &StoreConfig, tree: &str, dest: &Path, out: &mut impl Write) -> Result<()> {
    let store = ObjectStore::open(config)?;
    let id: ObjectId = tree.parse()?;
    utils::checkout_tree(&store, &id, dest)?;
    writeln!(out, "Checked out {} into {}", id, dest.display())?;
    Ok(())
}
