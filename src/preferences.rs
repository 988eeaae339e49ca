use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PlanDuration {
    #[serde(rename = "Single Day")]
    SingleDay,
    #[default]
    #[serde(rename = "Full Week")]
    FullWeek,
}

impl PlanDuration {
    pub fn label(&self) -> &'static str {
        match self {
            PlanDuration::SingleDay => "Single Day",
            PlanDuration::FullWeek => "Full Week",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MealFocus {
    #[default]
    #[serde(rename = "Full Meals")]
    FullMeals,
    #[serde(rename = "Breakfast Only")]
    BreakfastOnly,
}

impl MealFocus {
    pub fn label(&self) -> &'static str {
        match self {
            MealFocus::FullMeals => "Full Meals",
            MealFocus::BreakfastOnly => "Breakfast Only",
        }
    }
}

/// Form inputs for menu generation, remembered between runs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuPreferences {
    pub likes: String,
    pub dislikes: String,
    pub duration: PlanDuration,
    pub meal_focus: MealFocus,
    pub diet_notes: String,
}

impl MenuPreferences {
    pub fn is_customized(&self) -> bool {
        !self.likes.is_empty() || !self.dislikes.is_empty() || !self.diet_notes.is_empty()
    }
}

#[derive(Debug)]
pub enum PreferencesError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferencesError::Io(err) => write!(f, "Preferences I/O error: {}", err),
            PreferencesError::Serialization(err) => {
                write!(f, "Preferences serialization error: {}", err)
            }
        }
    }
}

impl Error for PreferencesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PreferencesError::Io(err) => Some(err),
            PreferencesError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for PreferencesError {
    fn from(err: std::io::Error) -> Self {
        PreferencesError::Io(err)
    }
}

impl From<serde_json::Error> for PreferencesError {
    fn from(err: serde_json::Error) -> Self {
        PreferencesError::Serialization(err)
    }
}

/// Load-at-start / save-on-change storage for one user's preferences.
pub trait PreferencesStore {
    fn load(&self) -> Result<MenuPreferences, PreferencesError>;
    fn save(&self, preferences: &MenuPreferences) -> Result<(), PreferencesError>;
    fn clear(&self) -> Result<(), PreferencesError>;
}

pub struct JsonFilePreferencesStore {
    path: PathBuf,
}

impl JsonFilePreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for JsonFilePreferencesStore {
    /// A missing or unparseable file yields defaults. Any other I/O failure
    /// (e.g. the path is a directory) is an error.
    fn load(&self) -> Result<MenuPreferences, PreferencesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MenuPreferences::default());
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(preferences) => Ok(preferences),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "ignoring unparseable preferences file");
                Ok(MenuPreferences::default())
            }
        }
    }

    fn save(&self, preferences: &MenuPreferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = ?self.path, "saved preferences");
        Ok(())
    }

    fn clear(&self) -> Result<(), PreferencesError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
pub struct InMemoryPreferencesStore {
    stored: Mutex<Option<MenuPreferences>>,
}

impl InMemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for InMemoryPreferencesStore {
    fn load(&self) -> Result<MenuPreferences, PreferencesError> {
        let stored = self.stored.lock().unwrap_or_else(|e| e.into_inner());
        Ok(stored.clone().unwrap_or_default())
    }

    fn save(&self, preferences: &MenuPreferences) -> Result<(), PreferencesError> {
        *self.stored.lock().unwrap_or_else(|e| e.into_inner()) = Some(preferences.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), PreferencesError> {
        *self.stored.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> MenuPreferences {
        MenuPreferences {
            likes: "chicken, berries".to_string(),
            dislikes: "mushrooms".to_string(),
            duration: PlanDuration::SingleDay,
            meal_focus: MealFocus::BreakfastOnly,
            diet_notes: "low sodium".to_string(),
        }
    }

    #[test]
    fn test_json_store_missing_file_gives_defaults() -> Result<(), PreferencesError> {
        let dir = TempDir::new()?;
        let store = JsonFilePreferencesStore::new(dir.path().join("prefs.json"));
        let loaded = store.load()?;
        assert_eq!(loaded, MenuPreferences::default());
        assert_eq!(loaded.duration, PlanDuration::FullWeek);
        assert_eq!(loaded.meal_focus, MealFocus::FullMeals);
        Ok(())
    }

    #[test]
    fn test_json_store_save_then_load() -> Result<(), PreferencesError> {
        let dir = TempDir::new()?;
        let store = JsonFilePreferencesStore::new(dir.path().join("nested/prefs.json"));
        store.save(&sample())?;
        assert_eq!(store.load()?, sample());

        let raw = std::fs::read_to_string(store.path())?;
        assert!(raw.contains("\"mealFocus\": \"Breakfast Only\""));
        assert!(raw.contains("\"dietNotes\": \"low sodium\""));
        Ok(())
    }

    #[test]
    fn test_json_store_partial_and_corrupt_files() -> Result<(), PreferencesError> {
        let dir = TempDir::new()?;
        let path = dir.path().join("prefs.json");
        let store = JsonFilePreferencesStore::new(&path);

        std::fs::write(&path, r#"{"likes": "quinoa"}"#)?;
        let partial = store.load()?;
        assert_eq!(partial.likes, "quinoa");
        assert_eq!(partial.duration, PlanDuration::FullWeek);

        std::fs::write(&path, "{not json")?;
        assert_eq!(store.load()?, MenuPreferences::default());
        Ok(())
    }

    #[test]
    fn test_json_store_unreadable_path_is_an_error() -> Result<(), PreferencesError> {
        let dir = TempDir::new()?;
        let store = JsonFilePreferencesStore::new(dir.path());
        assert!(matches!(store.load(), Err(PreferencesError::Io(_))));
        Ok(())
    }

    #[test]
    fn test_json_store_clear() -> Result<(), PreferencesError> {
        let dir = TempDir::new()?;
        let store = JsonFilePreferencesStore::new(dir.path().join("prefs.json"));
        store.clear()?;
        store.save(&sample())?;
        store.clear()?;
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_in_memory_store() -> Result<(), PreferencesError> {
        let store = InMemoryPreferencesStore::new();
        assert!(!store.load()?.is_customized());
        store.save(&sample())?;
        assert!(store.load()?.is_customized());
        store.clear()?;
        assert_eq!(store.load()?, MenuPreferences::default());
        Ok(())
    }
}
