//! Recursive capture discovery under a root directory.

use std::path::Path;

use walkdir::WalkDir;

use crate::capture::{CaptureFile, CaptureKind};
use crate::organize::OUTPUT_DIR_NAME;

/// Result of walking a directory tree for capture files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Capture candidates: all images first, then all videos,
    /// traversal order preserved within each group.
    pub captures: Vec<CaptureFile>,
    /// Paths that could not be read during the walk.
    pub errors: Vec<String>,
}

/// Walk the tree under `root` and collect capture files.
///
/// Any directory named [`OUTPUT_DIR_NAME`], at any depth, is skipped entirely
/// so already-organized output is never reprocessed. Unreadable entries are
/// collected into [`ScanResult::errors`] instead of being dropped silently.
#[must_use]
pub fn collect_captures(root: &Path) -> ScanResult {
    let mut images = Vec::new();
    let mut videos = Vec::new();
    let mut errors = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_output_dir(e)) {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(file) = CaptureFile::new(entry.into_path()) {
                    match file.kind {
                        CaptureKind::Image => images.push(file),
                        CaptureKind::Video => videos.push(file),
                    }
                }
            }
            Err(error) => errors.push(error.to_string()),
        }
    }

    images.extend(videos);
    ScanResult {
        captures: images,
        errors,
    }
}

fn is_output_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_str() == Some(OUTPUT_DIR_NAME)
}
