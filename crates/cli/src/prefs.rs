use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use moodlog_core::{Language, Theme, UiConfig};

const PREFS_FILE: &str = "prefs.json";

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";
pub const PROFILE_IMAGE_KEY: &str = "profile_image";
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Flat key/value file under the moodlog home directory.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl LocalStore {
    /// `MOODLOG_HOME` (or `--home`) wins; otherwise the platform config dir.
    pub fn resolve_home(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(home) = explicit {
            return Ok(home);
        }
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join("moodlog"))
            .context("could not locate a home directory, set MOODLOG_HOME")
    }

    pub fn open(home: &Path) -> Result<Self> {
        let path = home.join(PREFS_FILE);
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt preferences file {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed reading {}", path.display()))
            }
        };
        Ok(Self { path, values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            language: Language::from_optional_str(self.get(LANGUAGE_KEY)).unwrap_or_default(),
            theme: self
                .get(THEME_KEY)
                .and_then(Theme::parse)
                .unwrap_or_default(),
        }
    }

    pub fn auth_token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY).map(str::to_string)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed writing {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set(LANGUAGE_KEY, "en").unwrap();
        store.set(AUTH_TOKEN_KEY, "a.b.c").unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(LANGUAGE_KEY), Some("en"));
        assert_eq!(reopened.auth_token().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("nested")).unwrap();
        assert_eq!(store.ui_config(), UiConfig::default());
        assert_eq!(store.auth_token(), None);
    }

    #[test]
    fn unknown_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set(LANGUAGE_KEY, "de").unwrap();
        store.set(THEME_KEY, "dark").unwrap();

        let ui = store.ui_config();
        assert_eq!(ui.language, Language::Tr);
        assert_eq!(ui.theme, Theme::Dark);
    }

    #[test]
    fn remove_deletes_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::open(dir.path()).unwrap();
        store.set(PROFILE_IMAGE_KEY, "/tmp/me.png").unwrap();
        store.remove(PROFILE_IMAGE_KEY).unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get(PROFILE_IMAGE_KEY), None);
    }

    #[test]
    fn explicit_home_wins() {
        let home = PathBuf::from("/srv/moodlog");
        assert_eq!(LocalStore::resolve_home(Some(home.clone())).unwrap(), home);
    }
}
