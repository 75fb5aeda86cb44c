use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway lndwarden home directory.
pub struct TempHome {
    dir: TempDir,
}

impl TempHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::Builder::new()
                .prefix("lndwarden-home-")
                .tempdir()
                .expect("create temp home"),
        }
    }

    /// A home that already holds `lndwarden.toml` with `contents`.
    pub fn with_config(contents: &str) -> Self {
        let home = Self::new();
        home.write("lndwarden.toml", contents);
        home
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write file in temp home");
        path
    }
}
