use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn display_name_is_base_filename_with_extension() {
    let t = Track::from_locator("/music/albums/Intro.mp3");
    assert_eq!(t.display_name, "Intro.mp3");
    assert_eq!(t.locator, PathBuf::from("/music/albums/Intro.mp3"));

    let t = Track::from_locator("a.wav");
    assert_eq!(t.display_name, "a.wav");
}

#[test]
fn display_name_falls_back_to_locator_text() {
    let t = Track::from_locator("/");
    assert_eq!(t.display_name, "/");
}

#[test]
fn collect_keeps_input_order_across_files_and_directories() {
    let dir = tempdir().unwrap();
    let album = dir.path().join("album");
    fs::create_dir_all(&album).unwrap();
    fs::write(album.join("02.mp3"), b"x").unwrap();
    fs::write(album.join("01.mp3"), b"x").unwrap();
    let single = dir.path().join("zz-single.wav");
    fs::write(&single, b"x").unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, b"x").unwrap();

    let inputs = vec![
        single.clone(),
        notes,
        Path::new("/definitely/not/here.mp3").to_path_buf(),
        album.clone(),
    ];
    let files = collect_audio_files(&inputs, &LibrarySettings::default());
    assert_eq!(files, vec![single, album.join("01.mp3"), album.join("02.mp3")]);
}
