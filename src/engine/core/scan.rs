use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Video file extensions picked up from directories
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "webm", "mov", "avi", "flv", "m4v", "wmv", "ts",
];

/// Check if a path has a video file extension
pub fn is_video_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        if let Some(ext_str) = ext.to_str() {
            return VIDEO_EXTENSIONS.contains(&ext_str.to_lowercase().as_str());
        }
    }
    false
}

/// Scan a directory recursively for video files, sorted by path
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_video_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!("Found {} video files under {}", files.len(), root.display());
    Ok(files)
}

/// Inputs resolved from the command line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputSet {
    /// Files to transcode, in command-line order (directories expanded in place)
    pub files: Vec<PathBuf>,
    /// Paths that do not exist
    pub missing: Vec<PathBuf>,
}

/// Expand command-line paths: files are kept as given, directories are scanned
pub fn collect_inputs(paths: &[PathBuf]) -> Result<InputSet> {
    let mut inputs = InputSet::default();

    for path in paths {
        if path.is_dir() {
            inputs.files.extend(scan(path)?);
        } else if path.is_file() {
            inputs.files.push(path.clone());
        } else {
            inputs.missing.push(path.clone());
        }
    }

    Ok(inputs)
}
