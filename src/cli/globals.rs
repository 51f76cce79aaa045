use std::{path::PathBuf, time::Duration};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub session_file: PathBuf,
    pub timeout: Option<Duration>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            session_file: default_session_file(),
            timeout: None,
        }
    }
}

/// `<config dir>/tavola/session.json`, or a dotfile in the working directory when the
/// platform has no config directory.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::config_dir().map_or_else(
        || PathBuf::from(".tavola-session.json"),
        |dir| dir.join("tavola").join("session.json"),
    )
}
