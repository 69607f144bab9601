use std::path::{Path, PathBuf};

/// One playable audio item. Immutable once added to the playlist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub display_name: String,
    pub locator: PathBuf,
}

impl Track {
    /// Build a track whose display name is the locator's base filename.
    pub fn from_locator(locator: impl Into<PathBuf>) -> Self {
        let locator = locator.into();
        let display_name = display_name_of(&locator);
        Self {
            display_name,
            locator,
        }
    }
}

fn display_name_of(locator: &Path) -> String {
    match locator.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => locator.display().to_string(),
    }
}
