use std::fs;
use std::io;
use std::path::Path;

/// Merges `source` into `destination`: every entry under `source` is
/// recreated under `destination`, files overwriting existing ones, and the
/// consumed `source` tree is removed afterward. A missing `source` is a
/// no-op.
pub fn merge_tree(source: &Path, destination: &Path) -> io::Result<()> {
    if !source.is_dir() {
        return Ok(());
    }
    copy_children(source, destination)?;
    fs::remove_dir_all(source)
}

fn copy_children(source: &Path, destination: &Path) -> io::Result<()> {
    fs::create_dir_all(destination)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_children(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Removes a directory tree when present; an absent path is fine.
pub fn remove_dir_all_if_exists(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}
