use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::{set_file_times, FileTime};
use tracing::warn;
use walkdir::WalkDir;

pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    fn copy_file(&self, source: &Path, destination: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn remove_tree(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for item in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {}", dir.display(), err);
                    continue;
                }
            };
            let file_type = entry.file_type();
            // Symlinks are kept unless they resolve to a directory; broken
            // links then fail at copy time for that file only.
            if file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn copy_file(&self, source: &Path, destination: &Path) -> io::Result<()> {
        fs::copy(source, destination)?;
        let metadata = fs::metadata(source)?;
        fs::set_permissions(destination, metadata.permissions())?;
        set_file_times(
            destination,
            FileTime::from_last_access_time(&metadata),
            FileTime::from_last_modification_time(&metadata),
        )
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use filetime::{set_file_mtime, FileTime};

    use super::{FileSystem, LocalFileSystem};

    #[test]
    fn lists_only_direct_files_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.bin"), b"b").expect("write");
        fs::write(dir.path().join("a.bin"), b"a").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("nested").join("c.bin"), b"c").expect("write");

        let files = LocalFileSystem.list_files(dir.path()).expect("list");
        let names = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a.bin", "b.bin"]);
    }

    #[cfg(unix)]
    #[test]
    fn lists_file_symlinks_but_not_directory_symlinks() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("real.bin"), b"fw").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        std::os::unix::fs::symlink(dir.path().join("real.bin"), dir.path().join("link.bin"))
            .expect("symlink");
        std::os::unix::fs::symlink(dir.path().join("gone.bin"), dir.path().join("dead.bin"))
            .expect("symlink");
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("dir_link"))
            .expect("symlink");

        let files = LocalFileSystem.list_files(dir.path()).expect("list");
        let names = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["dead.bin", "link.bin", "real.bin"]);
    }

    #[test]
    fn copy_preserves_modification_time() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("fw.bin");
        fs::write(&source, b"firmware").expect("write");
        let stamp = FileTime::from_unix_time(1_600_000_000, 0);
        set_file_mtime(&source, stamp).expect("set mtime");

        let destination = dir.path().join("copy.bin");
        LocalFileSystem
            .copy_file(&source, &destination)
            .expect("copy");

        let metadata = fs::metadata(&destination).expect("metadata");
        assert_eq!(FileTime::from_last_modification_time(&metadata), stamp);
        assert_eq!(fs::read(&destination).expect("read"), b"firmware");
    }
}
