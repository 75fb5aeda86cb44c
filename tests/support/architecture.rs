use std::fs;
use std::path::{Path, PathBuf};

/// One offending source line: (path relative to the crate, line number, text).
pub type Hit = (String, usize, String);

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(crate_root())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries =
        fs::read_dir(dir).unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
    for entry in entries {
        let path = entry
            .unwrap_or_else(|e| panic!("failed to read dir entry: {e}"))
            .path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every `.rs` file below `relative_dir`, sorted.
pub fn rust_sources(relative_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk(&crate_root().join(relative_dir), &mut files);
    files.sort();
    files
}

fn scan(files: Vec<PathBuf>, mut offending: impl FnMut(&str) -> bool) -> Vec<Hit> {
    let mut hits = Vec::new();
    for file in files {
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|e| panic!("failed to read {}: {e}", file.display()));
        for (idx, line) in content.lines().enumerate() {
            if offending(line) {
                hits.push((display_path(&file), idx + 1, line.to_string()));
            }
        }
    }
    hits
}

/// Lines below `relative_dir` containing any of `patterns`.
pub fn lines_containing(relative_dir: &str, patterns: &[&str]) -> Vec<Hit> {
    scan(rust_sources(relative_dir), |line| {
        patterns.iter().any(|p| line.contains(p))
    })
}

/// Function definitions inside `mod.rs` files below `relative_dir`.
pub fn functions_in_mod_files(relative_dir: &str) -> Vec<Hit> {
    let mod_files = rust_sources(relative_dir)
        .into_iter()
        .filter(|f| f.file_name().and_then(|s| s.to_str()) == Some("mod.rs"))
        .collect();
    scan(mod_files, |line| {
        let line = line.trim_start();
        ["fn ", "pub fn ", "async fn ", "pub async fn ", "pub(crate) fn "]
            .iter()
            .any(|prefix| line.starts_with(prefix))
    })
}

pub fn path_exists(relative_path: &str) -> bool {
    crate_root().join(relative_path).exists()
}
