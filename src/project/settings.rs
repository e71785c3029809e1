use serde::Deserialize;
use serde_json::Value;

pub const SETTINGS_SECTION: &str = "mira";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub search_paths: Vec<String>,
    pub use_environment_path: bool,
}

impl Settings {
    // Accepts either the bare settings object or the editor's full
    // configuration with a `mira` section; anything unusable falls back
    // to defaults.
    pub fn from_value(value: &Value) -> Self {
        let section = value.get(SETTINGS_SECTION).unwrap_or(value);
        serde_json::from_value(section.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_bare_settings_object() {
        let settings = Settings::from_value(&json!({
            "searchPaths": ["/opt/mira", "vendor"],
            "useEnvironmentPath": true,
        }));
        assert_eq!(settings.search_paths, vec!["/opt/mira", "vendor"]);
        assert!(settings.use_environment_path);
    }

    #[test]
    fn reads_namespaced_settings_object() {
        let settings = Settings::from_value(&json!({
            "mira": { "searchPaths": ["lib"] }
        }));
        assert_eq!(settings.search_paths, vec!["lib"]);
        assert!(!settings.use_environment_path);
    }

    #[test]
    fn malformed_settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_value(&json!(42)), Settings::default());
        assert_eq!(
            Settings::from_value(&json!({"searchPaths": "not-a-list"})),
            Settings::default()
        );
    }
}
