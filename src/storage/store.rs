use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde_json::Error as SerdeError;

use super::account::Account;
use super::config::SessionConfig;

const CONFIG_FILE: &str = "accounts.json";

/// JSON-backed persistence for a [`SessionConfig`].
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// `~/.config/multi_account/accounts.json` on Linux,
    /// `%APPDATA%\multi_account\accounts.json` on Windows, etc.
    pub fn new() -> io::Result<Self> {
        let proj = ProjectDirs::from("", "", "multi_account")
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Unable to locate config dir"))?;
        let dir = proj.config_dir().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(CONFIG_FILE),
        })
    }

    /// Use an explicit file instead of the per-user location.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// A missing file is an empty config, not an error.
    pub fn load(&self) -> io::Result<SessionConfig> {
        match fs::File::open(&self.path) {
            Ok(file) => serde_json::from_reader(io::BufReader::new(file)).map_err(SerdeError::into),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config at {:?}; starting empty", self.path);
                Ok(SessionConfig::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Create or overwrite the config file.
    pub fn save(&self, config: &SessionConfig) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, config).map_err(SerdeError::into)
    }

    /// Insert or replace an account (matched by alias).
    pub fn upsert(&self, account: Account) -> io::Result<()> {
        let mut config = self.load()?;
        config.upsert(account);
        self.save(&config)
    }

    /// Delete an account (`Ok(true)` if removed, `Ok(false)` if it didn’t exist).
    pub fn remove(&self, alias: &str) -> io::Result<bool> {
        let mut config = self.load()?;
        let removed = config.remove(alias);
        if removed {
            self.save(&config)?;
        }
        Ok(removed)
    }

    /// Point the default at an existing alias (`Ok(false)` if unknown).
    pub fn set_default(&self, alias: &str) -> io::Result<bool> {
        let mut config = self.load()?;
        if !config.accounts.iter().any(|a| a.alias == alias) {
            return Ok(false);
        }
        config.default_account = Some(alias.to_owned());
        self.save(&config)?;
        Ok(true)
    }
}
