use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand `inputs` into audio file paths.
///
/// Files are kept when their extension is configured. Directories are walked
/// and their audio files appended sorted by path below that directory
/// (case-insensitive).
/// Input order is preserved; missing paths are skipped.
pub fn collect_audio_files(inputs: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);
    let mut files: Vec<PathBuf> = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = walk_dir(input, settings, &exts);
            debug!("found {} audio files under {:?}", found.len(), input);
            files.extend(found);
        } else if input.is_file() {
            if is_audio_file(input, &exts) {
                files.push(input.clone());
            } else {
                debug!("skipping {:?}, not a recognized audio extension", input);
            }
        } else {
            warn!("skipping {:?}, no such file or directory", input);
        }
    }

    files
}

fn walk_dir(dir: &Path, settings: &LibrarySettings, exts: &[String]) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, exts))
        .collect();

    // Relative paths keep each subdirectory's files together.
    found.sort_by_key(|p| {
        p.strip_prefix(dir)
            .unwrap_or(p)
            .to_string_lossy()
            .to_lowercase()
    });
    found
}
