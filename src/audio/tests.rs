use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use super::sink::tag_duration;
use super::*;
use crate::config::AudioSettings;

#[test]
fn tag_duration_ignores_non_audio_files() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("fake.mp3");
    std::fs::write(&fake, b"definitely not an mp3 frame").unwrap();

    assert_eq!(tag_duration(&fake), None);
    assert_eq!(tag_duration(Path::new("/no/such/file.mp3")), None);
}

#[test]
fn loading_missing_file_reports_error_notification() {
    let mut engine = RodioEngine::new(AudioSettings::default());
    let events = engine.subscribe();

    engine.load(3, Path::new("/no/such/dir/missing.mp3"));

    // The previous track's timing is cleared before the failure is reported.
    assert_eq!(
        events.recv_timeout(Duration::from_secs(10)).unwrap(),
        EngineEvent::DurationChanged(0)
    );
    assert_eq!(
        events.recv_timeout(Duration::from_secs(10)).unwrap(),
        EngineEvent::PositionChanged(0)
    );
    let event = events.recv_timeout(Duration::from_secs(10)).unwrap();
    match event {
        EngineEvent::Error { locator, message } => {
            assert_eq!(locator, PathBuf::from("/no/such/dir/missing.mp3"));
            assert!(!message.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(engine.duration(), 0);

    // Nothing loaded: transport commands are ignored without notifications.
    engine.play();
    engine.set_position(1_000);
    assert!(matches!(
        events.recv_timeout(Duration::from_millis(300)),
        Err(RecvTimeoutError::Timeout)
    ));

    engine.shutdown(Duration::ZERO);
}

#[test]
fn second_subscription_gets_a_closed_stream() {
    let mut engine = RodioEngine::new(AudioSettings::default());
    let _first = engine.subscribe();
    let second = engine.subscribe();

    assert!(matches!(
        second.recv_timeout(Duration::from_millis(50)),
        Err(RecvTimeoutError::Disconnected)
    ));
    engine.shutdown(Duration::ZERO);
}
