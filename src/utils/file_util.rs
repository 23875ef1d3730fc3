use ignore::WalkBuilder;
use std::{
    ffi::{OsStr, OsString},
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{ObjectError, Result};
use crate::store::{Backend, ObjectStore, tree::validate_name};
use crate::utils::{EntryMode, Object, ObjectId, ObjectKind, TreeEntry};

/// Blob digest of a file, stored first when `write` is set.
pub fn hash_file<B: Backend>(store: &ObjectStore<B>, path: &Path, write: bool) -> Result<ObjectId> {
    let content = fs::read(path)?;
    if write {
        store.put(ObjectKind::Blob, &content)
    } else {
        Ok(Object::blob(content).id())
    }
}

/// Snapshot `dir` into the store and return the root tree digest.
///
/// Subdirectories become subtrees, built depth-first. Paths listed in
/// `skip` (typically the store root) are left out, as is anything the
/// `.gitignore` / `.vitignore` rules exclude. Empty subdirectories are
/// dropped, matching what a tree of files can represent.
pub fn write_tree<B: Backend>(store: &ObjectStore<B>, dir: &Path, skip: &[PathBuf]) -> Result<ObjectId> {
    let entries = snapshot_dir(store, dir, skip)?;
    store.build_tree(entries)
}

fn snapshot_dir<B: Backend>(store: &ObjectStore<B>, dir: &Path, skip: &[PathBuf]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();

    for path in list_dir(dir, skip)? {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let name = name_bytes(file_name);
        let metadata = fs::symlink_metadata(&path)?;
        let file_type = metadata.file_type();

        if file_type.is_symlink() {
            let target = fs::read_link(&path)?;
            let id = store.put(ObjectKind::Blob, &name_bytes(target.as_os_str()))?;
            entries.push(TreeEntry::new(EntryMode::Symlink, name, id));
        } else if file_type.is_dir() {
            let children = snapshot_dir(store, &path, skip)?;
            if children.is_empty() {
                debug!(path = %path.display(), "skipping empty directory");
                continue;
            }
            let id = store.build_tree(children)?;
            entries.push(TreeEntry::new(EntryMode::Directory, name, id));
        } else if file_type.is_file() {
            let id = hash_file(store, &path, true)?;
            let mode = if is_executable(&metadata) {
                EntryMode::Executable
            } else {
                EntryMode::Regular
            };
            entries.push(TreeEntry::new(mode, name, id));
        }
    }

    Ok(entries)
}

/// Immediate children of `dir` that survive the ignore rules.
///
/// Any walker error fails the listing; a partial listing would produce a
/// tree that silently lacks content.
fn list_dir(dir: &Path, skip: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let skip: Vec<PathBuf> = skip.iter().filter_map(|p| fs::canonicalize(p).ok()).collect();
    let mut paths = Vec::new();

    for result in WalkBuilder::new(dir)
        .standard_filters(true)
        .hidden(false)
        .require_git(false)
        .add_custom_ignore_filename(".vitignore")
        .max_depth(Some(1))
        .build()
    {
        let dir_entry = result.map_err(walk_error)?;

        if dir_entry.depth() == 0 || dir_entry.file_name() == ".git" {
            continue;
        }
        let skipped = fs::canonicalize(dir_entry.path())
            .map(|canonical| skip.contains(&canonical))
            .unwrap_or(false);
        if skipped {
            continue;
        }

        paths.push(dir_entry.into_path());
    }

    Ok(paths)
}

/// Keep the walker's message (it carries the path) and the io error kind.
fn walk_error(err: ignore::Error) -> ObjectError {
    let message = err.to_string();
    let kind = err.into_io_error().map_or(io::ErrorKind::Other, |source| source.kind());
    ObjectError::Io(io::Error::new(kind, message))
}

/// Write the tree `id` out under `dest`, creating directories as needed.
pub fn checkout_tree<B: Backend>(store: &ObjectStore<B>, id: &ObjectId, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    for entry in store.tree_entries(id)? {
        // Trees read from disk are not trusted to hold safe names.
        validate_name(&entry.name)?;
        let path = dest.join(name_os_string(&entry.name));

        // Never write through whatever already sits at the path.
        remove_non_dir(&path)?;

        match entry.mode {
            EntryMode::Directory => checkout_tree(store, &entry.id, &path)?,
            EntryMode::Symlink => {
                let target = blob_body(store, &entry)?;
                write_symlink(&target, &path)?;
            }
            EntryMode::Regular | EntryMode::Executable => {
                let content = blob_body(store, &entry)?;
                fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .and_then(|mut file| file.write_all(&content))?;
                if entry.mode == EntryMode::Executable {
                    set_executable(&path)?;
                }
            }
        }
    }

    Ok(())
}

/// Remove a file or symlink at `path`; real directories are left alone.
fn remove_non_dir(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if !metadata.is_dir() => Ok(fs::remove_file(path)?),
        Ok(_) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn blob_body<B: Backend>(store: &ObjectStore<B>, entry: &TreeEntry) -> Result<Vec<u8>> {
    let object = store.get(&entry.id)?;
    if object.kind != ObjectKind::Blob {
        return Err(ObjectError::malformed(format!(
            "entry {:?} has mode {} but points at a {}",
            entry.name_lossy(),
            entry.mode,
            object.kind
        )));
    }
    Ok(object.body)
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn name_os_string(name: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(name).to_os_string()
}

#[cfg(not(unix))]
fn name_os_string(name: &[u8]) -> OsString {
    OsString::from(String::from_utf8_lossy(name).into_owned())
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn write_symlink(target: &[u8], path: &Path) -> Result<()> {
    std::os::unix::fs::symlink(name_os_string(target), path)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_symlink(target: &[u8], path: &Path) -> Result<()> {
    fs::write(path, target)?;
    Ok(())
}
