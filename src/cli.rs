use crate::commands::{
    get_cat_file_command, get_hash_object_command, get_init_command, get_ls_tree_command,
    get_read_tree_command, get_write_tree_command,
};
use crate::config::{DEFAULT_COMPRESSION, DEFAULT_DIR_NAME, StoreConfig};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::path::PathBuf;

pub fn cli() -> Command {
    Command::new("vit")
        .about("A content-addressed object store using rust")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .allow_external_subcommands(false)
        .arg(
            Arg::new("vit-dir")
                .long("vit-dir")
                .env("VIT_DIR")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_DIR_NAME)
                .help("Location of the store"),
        )
        .arg(
            Arg::new("compression")
                .long("compression")
                .env("VIT_COMPRESSION")
                .global(true)
                .value_name("LEVEL")
                .value_parser(value_parser!(u32).range(0..=9))
                .help("zlib level used for new objects"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more (repeat for more detail)"),
        )
        .subcommand(get_init_command())
        .subcommand(get_hash_object_command())
        .subcommand(get_cat_file_command())
        .subcommand(get_write_tree_command())
        .subcommand(get_ls_tree_command())
        .subcommand(get_read_tree_command())
}

/// Store settings from the global flags (or their env fallbacks).
pub fn store_config(matches: &ArgMatches) -> StoreConfig {
    let root = matches
        .get_one::<PathBuf>("vit-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME));
    let level = matches
        .get_one::<u32>("compression")
        .copied()
        .unwrap_or(DEFAULT_COMPRESSION);
    StoreConfig::new(root).with_compression(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_build_config() {
        let matches = cli()
            .try_get_matches_from(["vit", "--vit-dir", "/tmp/store", "--compression", "9", "write-tree"])
            .unwrap();
        let config = store_config(&matches);
        assert_eq!(config.root, PathBuf::from("/tmp/store"));
        assert_eq!(config.compression_level, 9);
    }

    #[test]
    fn compression_out_of_range_is_rejected() {
        assert!(cli()
            .try_get_matches_from(["vit", "--compression", "12", "init"])
            .is_err());
    }

    #[test]
    fn cat_file_needs_exactly_one_mode() {
        assert!(cli().try_get_matches_from(["vit", "cat-file", "abc"]).is_err());
        assert!(cli()
            .try_get_matches_from(["vit", "cat-file", "-p", "-t", "abc"])
            .is_err());
        assert!(cli().try_get_matches_from(["vit", "cat-file", "-p", "abc"]).is_ok());
    }
}
