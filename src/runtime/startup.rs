use std::path::PathBuf;

use log::info;

use crate::app::App;
use crate::audio::PlaybackEngine;
use crate::config::LibrarySettings;
use crate::coordinator::Coordinator;
use crate::library::collect_audio_files;

/// Expand `inputs` into audio files and append them to the playlist.
///
/// Leaves a one-line summary in `app.flash` and returns how many tracks
/// were added.
pub fn add_songs<E: PlaybackEngine>(
    inputs: &[PathBuf],
    library: &LibrarySettings,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
) -> usize {
    let files = collect_audio_files(inputs, library);
    if files.is_empty() {
        app.flash = Some(match inputs {
            [single] => format!("No audio files found in {}", single.display()),
            _ => "No audio files found".to_string(),
        });
        return 0;
    }

    let added = coordinator.add_tracks(files);
    app.flash = Some(match added {
        1 => "Added 1 track".to_string(),
        n => format!("Added {} tracks", n),
    });
    added
}

/// Add the paths given on the command line.
pub fn add_initial_tracks<E: PlaybackEngine>(
    args: Vec<PathBuf>,
    library: &LibrarySettings,
    app: &mut App,
    coordinator: &mut Coordinator<E>,
) {
    if args.is_empty() {
        info!("started without paths, playlist is empty");
        return;
    }
    let added = add_songs(&args, library, app, coordinator);
    info!("added {} tracks from {} launch paths", added, args.len());
    app.sync_follow(coordinator.current_index());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MockPlaybackEngine;

    fn engine() -> MockPlaybackEngine {
        let (_tx, rx) = std::sync::mpsc::channel();
        let mut engine = MockPlaybackEngine::new();
        engine.expect_subscribe().times(1).return_once(move || rx);
        engine
    }

    #[test]
    fn launch_paths_start_the_first_track_and_move_the_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let song = dir.path().join("only.ogg");
        std::fs::write(&song, b"").unwrap();

        let mut engine = engine();
        engine.expect_load().times(1).returning(|_, _| ());
        engine.expect_play().times(1).returning(|| ());
        let mut coordinator = Coordinator::new(engine);
        let mut app = App::new(true);
        app.selected = 3;

        add_initial_tracks(
            vec![dir.path().join("missing.mp3"), song],
            &LibrarySettings::default(),
            &mut app,
            &mut coordinator,
        );

        assert_eq!(coordinator.tracks().len(), 1);
        assert_eq!(coordinator.current_index(), Some(0));
        assert_eq!(app.selected, 0);
        assert_eq!(app.flash.as_deref(), Some("Added 1 track"));
    }

    #[test]
    fn no_launch_paths_leave_everything_untouched() {
        let mut coordinator = Coordinator::new(engine());
        let mut app = App::new(true);

        add_initial_tracks(Vec::new(), &LibrarySettings::default(), &mut app, &mut coordinator);

        assert!(coordinator.tracks().is_empty());
        assert_eq!(app.flash, None);
    }
}
