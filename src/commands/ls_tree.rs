use clap::{Arg, ArgAction, Command};
use std::io::Write;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::{ObjectStore, TreeListing};
use crate::utils::{ObjectId, TreeEntry};

pub fn get_ls_tree_command() -> Command {
    Command::new("ls-tree")
        .about("List the entries of a tree object")
        .arg(
            Arg::new("name-only")
                .long("name-only")
                .action(ArgAction::SetTrue)
                .help("Print entry names only"),
        )
        .arg(Arg::new("tree").required(true).help("Tree id"))
        .arg_required_else_help(true)
}

pub fn ls_tree(config: &StoreConfig, tree: &str, name_only: bool, out: &mut impl Write) -> Result<()> {
    let store = ObjectStore::open(config)?;
    let id: ObjectId = tree.parse()?;

    match store.read_tree(&id, name_only)? {
        TreeListing::Names(names) => {
            for name in names {
                out.write_all(&name)?;
                out.write_all(b"\n")?;
            }
        }
        TreeListing::Entries(entries) => write_entries(&entries, out)?,
    }
    Ok(())
}

/// `<mode> <kind> <id>\t<name>` per entry, modes zero-padded to six digits.
pub fn write_entries(entries: &[TreeEntry], out: &mut impl Write) -> Result<()> {
    for entry in entries {
        write!(
            out,
            "{:0>6} {} {}\t",
            entry.mode.as_str(),
            entry.mode.object_kind(),
            entry.id
        )?;
        out.write_all(&entry.name)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
