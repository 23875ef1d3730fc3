use clap::Command;
use std::{fs, io::Write};
use tracing::info;

use crate::config::StoreConfig;
use crate::error::Result;

pub fn get_init_command() -> Command {
    Command::new("init").about("Create an empty object store")
}

pub fn init(config: &StoreConfig, out: &mut impl Write) -> Result<()> {
    let path_to_vit = &config.root;

    if path_to_vit.exists() {
        writeln!(out, "Vit repository already initialized!")?;
        return Ok(());
    }

    // Create Required Directories
    fs::create_dir_all(config.objects_dir())?;
    fs::create_dir_all(path_to_vit.join("refs/heads"))?;
    fs::create_dir_all(path_to_vit.join("refs/tags"))?;

    // Create Required Files
    fs::write(path_to_vit.join("HEAD"), "ref: refs/heads/main\n")?;
    fs::write(
        path_to_vit.join("config"),
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = true\n\tbare = false\n",
    )?;

    info!(root = %path_to_vit.display(), "initialized store");
    writeln!(out, "Initialized empty Vit repository in {}", path_to_vit.display())?;
    Ok(())
}
