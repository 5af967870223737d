//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Where content and saves live and which map a session starts on.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Project directory handed to the content factory.
    pub data_dir: PathBuf,
    /// Save slot directory; `None` keeps saves in memory.
    pub save_dir: Option<PathBuf>,
    pub start_map: Option<String>,
    pub session_id: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_dir: None,
            start_map: None,
            session_id: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `PLAYMODE_DATA_DIR`
    /// - `PLAYMODE_SAVE_DIR`
    /// - `PLAYMODE_START_MAP`
    /// - `PLAYMODE_SESSION_ID`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("PLAYMODE_DATA_DIR") {
            config.data_dir = dir;
        }
        config.save_dir = read_env("PLAYMODE_SAVE_DIR");
        config.start_map = read_env::<String>("PLAYMODE_START_MAP").filter(|id| !id.is_empty());
        config.session_id = read_env::<String>("PLAYMODE_SESSION_ID").filter(|id| !id.is_empty());

        config
    }

    /// Settings file: beside the saves when they are on disk, else in the
    /// project directory.
    pub fn settings_path(&self) -> PathBuf {
        self.save_dir
            .as_deref()
            .unwrap_or(&self.data_dir)
            .join("settings.toml")
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
