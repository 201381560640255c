//! Capability-based filesystem helpers for writing export shards.
//!
//! Paths are UTF-8 throughout. Every operation resolves an ambient directory
//! handle first and then acts relative to it through `cap-std`.
#![forbid(unsafe_code)]

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Split `path` into an opened parent directory and the final file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
///
/// Fails when `path` has no file name or the parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should include a file name")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Propagates failures from opening the base directory or creating the
/// intermediate directories.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)
}

/// Create or truncate the file at `path` for writing.
///
/// The parent directory must already exist; see [`ensure_parent_dir`].
///
/// # Errors
///
/// Fails when the parent cannot be opened or the file cannot be created.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name.as_str())
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or parent directory reports `false` rather than an error.
///
/// # Errors
///
/// Propagates IO failures other than [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(pair) => pair,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Split a parent path into an ambient base directory and a relative suffix.
///
/// Absolute paths open their root (or Windows prefix) and return the rest as
/// the suffix. Relative paths resolve against the current directory.
///
/// # Errors
///
/// Fails on non-UTF-8 prefixes or when the base directory cannot be opened.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir should be UTF-8");
        (dir, root)
    }

    #[rstest]
    fn absolute_parents_split_at_the_root(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let shard = root.join("OR");

        let (_dir, relative) = base_dir_and_relative(&shard).expect("root should open");

        assert!(relative.is_relative());
        assert!(relative.ends_with("OR"));
        assert!(shard.ends_with(&relative));
    }

    #[rstest]
    fn relative_parents_resolve_against_the_working_directory() {
        let (_dir, relative) =
            base_dir_and_relative(Utf8Path::new("data/OR")).expect("cwd should open");

        assert_eq!(relative, Utf8PathBuf::from("data/OR"));
    }

    #[rstest]
    fn ensure_parent_dir_creates_nested_directories(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let target = root.join("OR").join("nested").join("Rogue.kml");

        ensure_parent_dir(&target).expect("parents should be created");

        assert!(root.join("OR").join("nested").is_dir());
        assert!(!target.exists());
    }

    #[rstest]
    fn ensure_parent_dir_ignores_bare_file_names() {
        ensure_parent_dir(Utf8Path::new("Rogue.kml")).expect("bare names need no parent");
    }

    #[rstest]
    fn create_file_truncates_existing_content(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let target = root.join("Rogue.kml");
        std::fs::write(&target, "stale content that is longer").expect("seed file");

        let mut file = create_utf8_file(&target).expect("file should be created");
        file.write_all(b"fresh").expect("write should succeed");
        drop(file);

        let content = std::fs::read_to_string(&target).expect("file should be readable");
        assert_eq!(content, "fresh");
    }

    #[rstest]
    fn file_is_file_distinguishes_files_and_directories(temp_root: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = temp_root;
        let file = root.join("present.kml");
        std::fs::write(&file, "x").expect("seed file");

        assert!(file_is_file(&file).expect("metadata should load"));
        assert!(!file_is_file(&root).expect("directory check should succeed"));
        assert!(!file_is_file(&root.join("absent.kml")).expect("missing file is not an error"));
        assert!(
            !file_is_file(&root.join("missing").join("absent.kml"))
                .expect("missing parent is not an error")
        );
    }

    #[rstest]
    fn open_dir_and_file_rejects_paths_without_names() {
        let err = open_dir_and_file(Utf8Path::new("/")).expect_err("root has no file name");
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
