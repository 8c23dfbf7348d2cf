use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};

const DATA_FILE_NAME: &str = ".chaoscatcher.json";

fn home_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    let var = "USERPROFILE";
    #[cfg(not(windows))]
    let var = "HOME";

    env::var(var)
        .map(PathBuf::from)
        .map_err(|_| anyhow!("Couldn't find {var} to place the data file"))
}

/// Default location of the tracker document, `~/.chaoscatcher.json`.
pub fn default_data_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(DATA_FILE_NAME))
}

/// Directory for application state (logs). By default tries $XDG_STATE_HOME or
/// $HOME/.local/state, and %APPDATA% on Windows. The directory is created if needed.
pub fn create_application_state_path() -> Result<PathBuf> {
    let mut path = {
        #[cfg(windows)]
        {
            env::var("APPDATA")
                .map(PathBuf::from)
                .map_err(|_| anyhow!("APPDATA should be present on Windows"))?
        }
        #[cfg(not(windows))]
        {
            match env::var("XDG_STATE_HOME") {
                Ok(state) => PathBuf::from(state),
                Err(_) => home_dir()?.join(".local/state"),
            }
        }
    };
    path.push("chaoscatcher");

    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// `logs` under the state directory. Created up front since the rolling appender prunes old files
/// on startup and reports a missing directory on stderr.
pub fn create_application_log_path() -> Result<PathBuf> {
    let path = create_application_state_path()?.join("logs");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}
