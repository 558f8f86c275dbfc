//! Expands the CLI's input path(s) into a concrete file list (spec §6:
//! "input path(s), a recursive flag"). A bare file is taken as-is; a
//! directory is walked one level deep unless `recursive` is set.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn discover(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        collect(path, recursive, &mut files);
    }
    files.sort();
    files.dedup();
    files
}

fn collect(path: &Path, recursive: bool, out: &mut Vec<PathBuf>) {
    if path.is_file() {
        out.push(path.to_path_buf());
        return;
    }
    if !path.is_dir() {
        tracing::warn!(path = %path.display(), "input path does not exist; skipping");
        return;
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    for entry in WalkDir::new(path).max_depth(max_depth).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            out.push(entry.path().to_path_buf());
        }
    }
}
