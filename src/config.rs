use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::GROQ_API_BASE;
use crate::menu_generator::DEFAULT_MODEL;

// Environment variable names
pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
pub const MODEL_ENV_VAR: &str = "MENU_PLANNER_MODEL";
pub const API_BASE_ENV_VAR: &str = "MENU_PLANNER_API_BASE";
pub const CATALOG_ENV_VAR: &str = "MENU_PLANNER_CATALOG";
pub const PREFS_ENV_VAR: &str = "MENU_PLANNER_PREFS";

pub const DEFAULT_CATALOG_PATH: &str = "data/meal_plans.csv";
pub const DEFAULT_PREFS_PATH: &str = "menu_preferences.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Name of the variable the API key is read from; the key itself is read per request.
    pub api_key_env_var: String,
    pub model: String,
    pub api_base_url: String,
    pub catalog_path: PathBuf,
    pub preferences_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: GROQ_API_BASE.to_string(),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            preferences_path: PathBuf::from(DEFAULT_PREFS_PATH),
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and overlays any set variables on the defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            api_key_env_var: defaults.api_key_env_var,
            model: non_empty(MODEL_ENV_VAR).unwrap_or(defaults.model),
            api_base_url: non_empty(API_BASE_ENV_VAR).unwrap_or(defaults.api_base_url),
            catalog_path: non_empty(CATALOG_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            preferences_path: non_empty(PREFS_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_path),
        }
    }
}
