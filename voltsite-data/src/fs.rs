//! Filesystem helpers built on `cap-std` and `camino`.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the parent directory of `path`, returning it with the file name.
///
/// # Errors
///
/// Fails when `path` has no file name or the directory cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = file_name(path)?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_of(path), ambient_authority())?;
    Ok((dir, name))
}

/// Whether `path` exists and is a regular file.
///
/// # Errors
///
/// Propagates failures to open the parent directory or read metadata.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// Missing directories are created beneath the nearest existing ancestor.
///
/// # Errors
///
/// Propagates directory creation and write failures.
pub fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    let name = file_name(path)?;
    let parent = parent_of(path);
    for ancestor in parent.ancestors() {
        let base = if ancestor.as_str().is_empty() {
            Utf8Path::new(".")
        } else {
            ancestor
        };
        let dir = match fs_utf8::Dir::open_ambient_dir(base, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err),
        };
        let missing = parent.strip_prefix(ancestor).unwrap_or(Utf8Path::new(""));
        if missing.as_str().is_empty() {
            return dir.write(name.as_str(), contents);
        }
        dir.create_dir_all(missing)?;
        return dir.open_dir(missing)?.write(name.as_str(), contents);
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no existing ancestor of {parent}"),
    ))
}

fn parent_of(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn file_name(path: &Utf8Path) -> io::Result<String> {
    path.file_name()
        .map(str::to_owned)
        .ok_or_else(|| io::Error::other("path should include a file name"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_dir(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir")
    }

    #[rstest]
    fn writes_into_missing_directories() {
        let temp = TempDir::new().expect("temp dir");
        let target = utf8_dir(&temp).join("nested/deeper/plan.json");

        write_utf8_file(&target, "{}").expect("write succeeds");

        assert!(file_is_file(&target).expect("metadata readable"));
        let read = std::fs::read_to_string(target.as_std_path()).expect("readable");
        assert_eq!(read, "{}");
    }

    #[rstest]
    fn writes_beside_an_existing_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_dir(&temp);
        write_utf8_file(&root.join("first.json"), "1").expect("first write");
        write_utf8_file(&root.join("second.json"), "2").expect("second write");

        let second = root.join("second.json");
        let read = std::fs::read_to_string(second.as_std_path()).expect("readable");
        assert_eq!(read, "2");
        assert!(file_is_file(&root.join("first.json")).expect("metadata readable"));
    }

    #[rstest]
    fn paths_without_file_name_are_rejected() {
        let temp = TempDir::new().expect("temp dir");
        let root = utf8_dir(&temp);
        assert!(write_utf8_file(&root.join(".."), "{}").is_err());
    }

    #[rstest]
    fn directories_are_not_files() {
        let temp = TempDir::new().expect("temp dir");
        let dir = utf8_dir(&temp).join("sub");
        std::fs::create_dir(dir.as_std_path()).expect("create dir");
        assert!(!file_is_file(&dir).expect("metadata readable"));
    }
}
