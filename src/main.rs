use colored::Colorize;
use std::{io, path::PathBuf, process};
use vit_store::cli::{cli, store_config};
use vit_store::commands::{CatMode, cat_file, hash_object, init, ls_tree, read_tree, write_tree};
use vit_store::logging::init_logging;

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let config = store_config(&matches);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match matches.subcommand() {
        Some(("init", _sub_matches)) => init(&config, &mut out),
        Some(("hash-object", sub_matches)) => {
            let file = sub_matches.get_one::<String>("file").unwrap();
            hash_object(&config, &PathBuf::from(file), sub_matches.get_flag("write"), &mut out)
        }
        Some(("cat-file", sub_matches)) => {
            let object = sub_matches.get_one::<String>("object").unwrap();
            let mode = if sub_matches.get_flag("kind") {
                CatMode::Kind
            } else if sub_matches.get_flag("size") {
                CatMode::Size
            } else {
                CatMode::Pretty
            };
            cat_file(&config, object, mode, &mut out)
        }
        Some(("write-tree", _sub_matches)) => write_tree(&config, &mut out),
        Some(("ls-tree", sub_matches)) => {
            let tree = sub_matches.get_one::<String>("tree").unwrap();
            ls_tree(&config, tree, sub_matches.get_flag("name-only"), &mut out)
        }
        Some(("read-tree", sub_matches)) => {
            let tree = sub_matches.get_one::<String>("tree").unwrap();
            let dest = sub_matches.get_one::<String>("dest").unwrap();
            read_tree(&config, tree, &PathBuf::from(dest), &mut out)
        }
        _ => unreachable!("Unknown subcommand!"),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
