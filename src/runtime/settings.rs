use crate::config::Settings;
use crate::error::Error;

/// Load and validate settings, falling back to defaults.
///
/// Logging is not initialized yet when this runs, so the failure is handed
/// back for the caller to report once the logger is up.
pub fn load_settings() -> (Settings, Option<Error>) {
    match Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(e) => (Settings::default(), Some(e)),
        },
        Err(e) => (Settings::default(), Some(e)),
    }
}
