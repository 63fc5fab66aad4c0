use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked, in order, for the API credential.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,

    /// Unset means the request may take as long as the model needs.
    pub request_timeout_secs: Option<u64>,

    pub ui_scale: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: None,
            ui_scale: 1.0,
        }
    }
}

impl AppSettings {
    /// Environment credentials win over the stored one.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = API_KEY_VARS
            .into_iter()
            .filter_map(|var| lookup(var))
            .find(|v| !v.trim().is_empty())
        {
            self.api_key = Some(key);
        }
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
