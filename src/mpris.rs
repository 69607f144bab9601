//! MPRIS D-Bus service so media keys and desktop widgets can drive the player.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use log::{debug, error, info};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::coordinator::PlaybackStatus;
use crate::library::Track;

const BUS_NAME: &str = "org.mpris.MediaPlayer2.glassplay";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// Requests forwarded from the bus to the runtime loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackStatus,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    position_micros: i64,
    track_id: Option<OwnedObjectPath>,
}

/// Snapshot writer used by the runtime loop.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_position(&self, position_ms: u64) {
        if let Ok(mut s) = self.state.lock() {
            s.position_micros = (position_ms.min(i64::MAX as u64 / 1000) as i64) * 1000;
        }
    }

    /// Publish the now-playing track, or clear it with `None`.
    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>, length_ms: u64) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        match (index, track) {
            (Some(idx), Some(track)) => {
                s.title = Some(track.display_name.clone());
                s.url = Some(file_url(&track.locator));
                s.length_micros = (length_ms > 0).then(|| (length_ms as i64).saturating_mul(1000));
                s.track_id = ObjectPath::try_from(format!("{}/track/{}", OBJECT_PATH, idx))
                    .ok()
                    .map(OwnedObjectPath::from);
            }
            _ => {
                s.title = None;
                s.url = None;
                s.length_micros = None;
                s.position_micros = 0;
                s.track_id = None;
            }
        }
    }
}

/// `file://` URL for `path`, escaping bytes outside the unreserved set.
fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut url = String::with_capacity(raw.len() + 7);
    url.push_str("file://");
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'/' | b'-' | b'_' | b'.' | b'~' => {
                url.push(b as char)
            }
            _ => url.push_str(&format!("%{:02X}", b)),
        }
    }
    url
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise in a terminal.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "glassplay"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        ["audio/mpeg", "audio/wav", "audio/flac", "audio/ogg"]
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return PlaybackStatus::Stopped.as_str();
        };
        s.playback.as_str()
    }

    /// Playback position in microseconds.
    #[zbus(property)]
    fn position(&self) -> i64 {
        self.state.lock().map(|s| s.position_micros).unwrap_or(0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(v) = s
            .track_id
            .as_ref()
            .and_then(|id| owned(Value::from(id.clone().into_inner())))
        {
            map.insert("mpris:trackid".to_string(), v);
        }
        if let Some(v) = s.title.as_ref().and_then(|t| owned(Value::from(t.as_str()))) {
            map.insert("xesam:title".to_string(), v);
        }
        if let Some(v) = s.url.as_ref().and_then(|u| owned(Value::from(u.as_str()))) {
            map.insert("xesam:url".to_string(), v);
        }
        if let Some(v) = s.length_micros.and_then(|l| owned(Value::from(l))) {
            map.insert("mpris:length".to_string(), v);
        }
        map
    }
}

/// Serve MPRIS on the session bus from a background thread.
///
/// Bus failures are logged; the player keeps working without media keys.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    error!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                error!("MPRIS: failed to acquire name {BUS_NAME}: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                error!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                error!("MPRIS: failed to register player iface: {e}");
                return;
            }
            info!("MPRIS: serving {BUS_NAME}");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
                debug!("MPRIS: still serving");
            }
        });
    });

    MprisHandle { state }
}
