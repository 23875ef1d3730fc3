//! End-to-end tests for the command layer

use std::fs;

use tempfile::TempDir;
use vit_store::commands::{CatMode, cat_file, hash_object, init, ls_tree, read_tree, write_tree};
use vit_store::{ObjectError, StoreConfig};

fn run<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> vit_store::Result<()>,
{
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn workspace() -> (TempDir, StoreConfig) {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(temp_dir.path());
    run(|out| init(&config, out));
    (temp_dir, config)
}

#[test]
fn test_hash_object_then_cat_file() {
    let (temp_dir, config) = workspace();
    let file = temp_dir.path().join("hello.txt");
    fs::write(&file, "hello\n").unwrap();

    let id = run(|out| hash_object(&config, &file, true, out));
    let id = id.trim();
    assert_eq!(id, "2cf8d83d9ee29543b34a87727421fdecb7e3f3a183d337639025de576db9ebb4");

    assert_eq!(run(|out| cat_file(&config, id, CatMode::Pretty, out)), "hello\n");
    assert_eq!(run(|out| cat_file(&config, id, CatMode::Kind, out)), "blob\n");
    assert_eq!(run(|out| cat_file(&config, id, CatMode::Size, out)), "6\n");
}

#[test]
fn test_hash_object_without_write() {
    let (temp_dir, config) = workspace();
    let file = temp_dir.path().join("loose.txt");
    fs::write(&file, "not stored").unwrap();

    let id = run(|out| hash_object(&config, &file, false, out));
    let mut out = Vec::new();
    let err = cat_file(&config, id.trim(), CatMode::Pretty, &mut out).unwrap_err();
    assert!(matches!(err, ObjectError::ObjectNotFound(_)));
}

#[test]
fn test_write_tree_and_ls_tree() {
    let (temp_dir, config) = workspace();
    let root = temp_dir.path();
    fs::write(root.join("b.txt"), "b").unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir/c.txt"), "c").unwrap();

    let tree = run(|out| write_tree(&config, out));
    let tree = tree.trim();

    assert_eq!(
        run(|out| ls_tree(&config, tree, true, out)),
        "a.txt\nb.txt\ndir\n"
    );

    let listing = run(|out| ls_tree(&config, tree, false, out));
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("100644 blob "));
    assert!(lines[0].ends_with("\ta.txt"));
    assert!(lines[2].starts_with("040000 tree "));

    assert_eq!(run(|out| cat_file(&config, tree, CatMode::Pretty, out)), listing);
    assert_eq!(run(|out| cat_file(&config, tree, CatMode::Kind, out)), "tree\n");
}

#[test]
fn test_write_tree_is_stable() {
    let (temp_dir, config) = workspace();
    fs::write(temp_dir.path().join("same.txt"), "same").unwrap();

    let first = run(|out| write_tree(&config, out));
    let second = run(|out| write_tree(&config, out));
    assert_eq!(first, second);
}

#[test]
fn test_read_tree_restores_files() {
    let (temp_dir, config) = workspace();
    fs::create_dir(temp_dir.path().join("nested")).unwrap();
    fs::write(temp_dir.path().join("nested/file.txt"), "payload").unwrap();
    let tree = run(|out| write_tree(&config, out));

    let dest = TempDir::new().unwrap();
    run(|out| read_tree(&config, tree.trim(), dest.path(), out));
    assert_eq!(
        fs::read_to_string(dest.path().join("nested/file.txt")).unwrap(),
        "payload"
    );
}

#[test]
fn test_ls_tree_on_blob() {
    let (temp_dir, config) = workspace();
    let file = temp_dir.path().join("blob.txt");
    fs::write(&file, "blob").unwrap();
    let id = run(|out| hash_object(&config, &file, true, out));

    let err = ls_tree(&config, id.trim(), false, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ObjectError::NotATree { .. }));
}

#[test]
fn test_bad_object_id() {
    let (_temp_dir, config) = workspace();
    let err = cat_file(&config, "not-a-digest", CatMode::Pretty, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ObjectError::InvalidObjectId(_)));
}

#[test]
fn test_write_tree_snapshots_parent_of_custom_store_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::new(temp_dir.path().join("store-data"));
    run(|out| init(&config, out));
    fs::write(temp_dir.path().join("notes.txt"), "notes").unwrap();

    let tree = run(|out| write_tree(&config, out));
    assert_eq!(run(|out| ls_tree(&config, tree.trim(), true, out)), "notes.txt\n");
}

#[test]
fn test_commands_need_init() {
    let temp_dir = TempDir::new().unwrap();
    let config = StoreConfig::in_dir(temp_dir.path());
    let err = write_tree(&config, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, ObjectError::StoreNotFound(_)));
}
