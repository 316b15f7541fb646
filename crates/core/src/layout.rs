use std::path::{Path, PathBuf};

use crate::error::{OrganizeError, Result};
use crate::fs::FileSystem;
use crate::model::Category;

pub fn create_version_layout(fs: &dyn FileSystem, base: &Path, version: &str) -> Result<PathBuf> {
    let version_dir = base.join(version);
    fs.ensure_dir(&version_dir)
        .map_err(|err| OrganizeError::io(&version_dir, err))?;
    for category in Category::ALL {
        let category_dir = version_dir.join(category.dir_name());
        fs.ensure_dir(&category_dir)
            .map_err(|err| OrganizeError::io(&category_dir, err))?;
    }
    Ok(version_dir)
}

pub fn relative_destination(version: &str, category: Option<Category>, file_name: &str) -> PathBuf {
    let mut path = PathBuf::from(version);
    if let Some(category) = category {
        path.push(category.dir_name());
    }
    path.push(file_name);
    path
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{create_version_layout, relative_destination};
    use crate::fs::memory::MemoryFileSystem;
    use crate::model::Category;

    #[test]
    fn creates_all_category_folders() {
        let fs = MemoryFileSystem::default();
        let version_dir =
            create_version_layout(&fs, Path::new("custom"), "0.15.1").expect("layout");
        assert_eq!(version_dir, PathBuf::from("custom/0.15.1"));
        for category in Category::ALL {
            assert!(fs.has_dir(version_dir.join(category.dir_name())));
        }
    }

    #[test]
    fn layout_creation_is_idempotent() {
        let fs = MemoryFileSystem::default();
        create_version_layout(&fs, Path::new("custom"), "0.15.1").expect("first");
        let before = fs.dirs_under("custom");
        create_version_layout(&fs, Path::new("custom"), "0.15.1").expect("second");
        assert_eq!(fs.dirs_under("custom"), before);
        // root + version + six categories
        assert_eq!(before.len(), 8);
    }

    #[test]
    fn uncategorized_files_land_in_version_root() {
        assert_eq!(
            relative_destination("0.15.1", None, "WLED_0.15.1_esp8266.bin"),
            PathBuf::from("0.15.1/WLED_0.15.1_esp8266.bin")
        );
        assert_eq!(
            relative_destination("0.15.1", Some(Category::MiniShield), "a.bin"),
            PathBuf::from("0.15.1/mini_shield/a.bin")
        );
    }
}
