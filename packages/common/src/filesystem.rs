use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// File system abstraction for export preconditions and testing
pub trait FileSystem {
    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a UTF-8 file
    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error>;

    /// List the files directly inside a directory, sorted by name
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, std::io::Error>;
}

/// Real file system implementation
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Mock file system for testing
pub struct MockFileSystem {
    pub files: HashMap<PathBuf, String>,
    pub dirs: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            dirs: HashSet::new(),
        }
    }

    /// Add a file and register all of its ancestors as directories
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        self.files.insert(path, content.into());
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) {
        self.dirs.insert(path.into());
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        if !self.dirs.contains(dir) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", dir.display()),
            ));
        }
        let mut files: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_registers_parent_dirs() {
        let mut fs = MockFileSystem::new();
        fs.add_file("build/assets/app.js", "console.log(1)");

        assert!(fs.is_dir(Path::new("build")));
        assert!(fs.is_dir(Path::new("build/assets")));
        assert!(fs.exists(Path::new("build/assets/app.js")));
        assert!(!fs.exists(Path::new("build/index.html")));
    }

    #[test]
    fn test_mock_lists_direct_children_only() {
        let mut fs = MockFileSystem::new();
        fs.add_file("build/assets/b.css", "");
        fs.add_file("build/assets/a.js", "");
        fs.add_file("build/assets/nested/c.js", "");

        let files = fs.list_files(Path::new("build/assets")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("build/assets/a.js"),
                PathBuf::from("build/assets/b.css")
            ]
        );
    }

    #[test]
    fn test_real_fs_lists_sorted_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("z.txt"), "z").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let fs = RealFileSystem;
        let files = fs.list_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.txt"));
        assert_eq!(fs.read_to_string(&files[1]).unwrap(), "z");
    }
}
