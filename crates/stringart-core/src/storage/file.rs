//! File-based storage for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult, validate_name};
use std::fs;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Stores each scene as `<dir>/<name>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so an
/// interrupted save never leaves a truncated document behind.
pub struct FileStorage {
    dir: PathBuf,
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { action, path, source }
}

impl FileStorage {
    /// Storage rooted at `dir`, created if needed.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir).map_err(io_error("create", &dir))?;
        Ok(Self { dir })
    }

    /// Storage in the platform data directory, e.g.
    /// `~/.local/share/stringart/scenes/` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir().or_else(dirs::home_dir).ok_or_else(|| StorageError::Io {
            action: "locate",
            path: PathBuf::from("data directory"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
        })?;
        Self::new(base.join("stringart").join("scenes"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name).with_extension(EXTENSION))
    }
}

impl Storage for FileStorage {
    fn read(&self, name: &str) -> BoxFuture<'_, StorageResult<String>> {
        let path = self.path_of(name);
        let name = name.to_string();
        Box::pin(async move {
            let path = path?;
            match fs::read_to_string(&path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound(name)),
                result => result.map_err(io_error("read", &path)),
            }
        })
    }

    fn write(&self, name: &str, json: String) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_of(name);
        Box::pin(async move {
            let path = path?;
            let partial = path.with_extension("json.partial");
            fs::write(&partial, json).map_err(io_error("write", &partial))?;
            fs::rename(&partial, &path).map_err(io_error("replace", &path))?;
            log::debug!("Wrote {}", path.display());
            Ok(())
        })
    }

    fn remove(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.path_of(name);
        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(io_error("delete", &path)(e)),
            }
        })
    }

    fn names(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.dir).map_err(io_error("list", &self.dir))?;
            let mut names: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
                .filter(|name| validate_name(name).is_ok())
                .collect();
            names.sort();
            Ok(names)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use crate::shapes::Line;
    use crate::vector::Vector;
    use pollster::block_on;
    use tempfile::tempdir;

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_line(Line::new(Vector::new(0.0, 0.0), Vector::new(30.0, 40.0)));
        scene
    }

    #[test]
    fn test_scene_written_as_document_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        block_on(storage.save_scene("spiral", &scene())).unwrap();

        let text = fs::read_to_string(dir.path().join("spiral.json")).unwrap();
        assert!(text.contains("\"lineData\""));
        assert!(!dir.path().join("spiral.json.partial").exists());

        let loaded = block_on(storage.load_scene("spiral")).unwrap();
        assert_eq!(loaded.lines().next().unwrap().1.length(), 50.0);
    }

    #[test]
    fn test_missing_and_corrupt_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            block_on(storage.load_scene("absent")),
            Err(StorageError::NotFound(_))
        ));

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            block_on(storage.load_scene("broken")),
            Err(StorageError::Damaged { .. })
        ));
    }

    #[test]
    fn test_names_skip_foreign_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested")).unwrap();
        block_on(storage.save_scene("two", &scene())).unwrap();
        block_on(storage.save_scene("one", &scene())).unwrap();
        fs::write(storage.dir().join("notes.txt"), "hello").unwrap();
        fs::write(storage.dir().join("bad name.json"), "{}").unwrap();

        assert_eq!(block_on(storage.names()).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        block_on(storage.save_scene("gone", &scene())).unwrap();
        assert!(block_on(storage.remove("gone")).unwrap());
        assert!(!block_on(storage.remove("gone")).unwrap());
        assert!(block_on(storage.names()).unwrap().is_empty());
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let result = block_on(storage.write("../escape", "{}".to_string()));
        assert!(matches!(result, Err(StorageError::InvalidName(_))));
    }
}
