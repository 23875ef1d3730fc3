use clap::{Arg, ArgAction, ArgGroup, Command};
use std::io::Write;

use crate::commands::ls_tree::write_entries;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::ObjectStore;
use crate::utils::{ObjectId, ObjectKind, parse_tree_entries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatMode {
    Pretty,
    Kind,
    Size,
}

pub fn get_cat_file_command() -> Command {
    Command::new("cat-file")
        .about("Show the content, kind or size of a stored object")
        .arg(
            Arg::new("pretty")
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Pretty-print the object body"),
        )
        .arg(
            Arg::new("kind")
                .short('t')
                .action(ArgAction::SetTrue)
                .help("Show the object kind"),
        )
        .arg(
            Arg::new("size")
                .short('s')
                .action(ArgAction::SetTrue)
                .help("Show the body size in bytes"),
        )
        .group(
            ArgGroup::new("mode")
                .args(["pretty", "kind", "size"])
                .required(true),
        )
        .arg(Arg::new("object").required(true).help("Object id"))
        .arg_required_else_help(true)
}

pub fn cat_file(config: &StoreConfig, object: &str, mode: CatMode, out: &mut impl Write) -> Result<()> {
    let store = ObjectStore::open(config)?;
    let id: ObjectId = object.parse()?;
    let object = store.get(&id)?;

    match mode {
        CatMode::Kind => writeln!(out, "{}", object.kind)?,
        CatMode::Size => writeln!(out, "{}", object.body.len())?,
        CatMode::Pretty => match object.kind {
            ObjectKind::Blob => out.write_all(&object.body)?,
            ObjectKind::Tree => write_entries(&parse_tree_entries(&object.body)?, out)?,
        },
    }
    Ok(())
}
