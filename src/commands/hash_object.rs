use clap::{Arg, ArgAction, Command};
use std::{fs, io::Write, path::Path};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::store::ObjectStore;
use crate::utils::{self, Object};

pub fn get_hash_object_command() -> Command {
    Command::new("hash-object")
        .about("Compute the blob id of a file")
        .arg(
            Arg::new("write")
                .short('w')
                .action(ArgAction::SetTrue)
                .help("Also write the blob into the store"),
        )
        .arg(Arg::new("file").required(true).help("File to hash"))
        .arg_required_else_help(true)
}

pub fn hash_object(config: &StoreConfig, file: &Path, write: bool, out: &mut impl Write) -> Result<()> {
    let id = if write {
        let store = ObjectStore::open(config)?;
        utils::hash_file(&store, file, true)?
    } else {
        Object::blob(fs::read(file)?).id()
    };

    writeln!(out, "{}", id)?;
    Ok(())
}
