//! [`TestOutput`]: a temporary asset directory.

use std::fs;
use std::path::{Path, PathBuf};

use iconsync_fs::DiskStore;
use tempfile::TempDir;

/// A temporary working directory with an output directory inside it.
///
/// # Example
///
/// ```rust,no_run
/// use iconsync_test_utils::TestOutput;
///
/// let out = TestOutput::new();
/// out.write("icons/logo.svg", "<svg/>");
/// out.assert_file_exists("icons/logo.svg");
/// ```
pub struct TestOutput {
    temp_dir: TempDir,
}

impl Default for TestOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOutput {
    /// Output directory name used by [`TestOutput::store`].
    pub const OUTPUT_DIR: &'static str = "icons";

    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// The temporary working directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// `<root>/icons`.
    pub fn output_dir(&self) -> PathBuf {
        self.root().join(Self::OUTPUT_DIR)
    }

    /// A disk store rooted at [`TestOutput::output_dir`].
    pub fn store(&self) -> DiskStore {
        DiskStore::new(self.output_dir())
    }

    /// Write `content` to `path` relative to the root, creating parents.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    pub fn delete(&self, path: &str) {
        fs::remove_file(self.root().join(path)).unwrap();
    }

    /// Write a config file pointing at [`TestOutput::OUTPUT_DIR`].
    pub fn write_config(&self, extra: &str) {
        self.write(
            "iconsync.toml",
            &format!(
                "output_dir = \"{}\"\n{extra}\n[remote]\nfile_key = \"test-file\"\ntoken = \"test-token\"\n",
                Self::OUTPUT_DIR
            ),
        );
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(full_path.exists(), "Expected file to exist: {}", full_path.display());
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(!full_path.exists(), "Expected file NOT to exist: {}", full_path.display());
    }

    /// # Panics
    /// Panics if the file cannot be read or does not equal `content`.
    pub fn assert_file_eq(&self, path: &str, content: &str) {
        assert_eq!(self.read(path), content, "unexpected content in {path}");
    }
}
