//! Configuration file loading and error types.

use std::{fs, path::Path};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format")]
    UnsupportedFormat,
    #[error("validation: {0}")]
    Validation(String),
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
        "json" => Ok(serde_json::from_str(&data)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&data)?),
        "toml" => Ok(toml::from_str(&data)?),
        _ => Err(ConfigError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, name: &str, data: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "vless.toml",
            r#"
[store]
users_db = "/tmp/users.json"

[xray]
service = "xray@main"

[admin]
ids = [555]
"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.users_db, "/tmp/users.json");
        assert_eq!(config.xray.service, "xray@main");
        assert_eq!(config.admin.ids, vec![555]);
        // untouched sections keep their defaults
        assert_eq!(config.xray.reload_timeout_secs, 10);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "vless.json",
            r#"{"store": {"users_db": "users.json"}, "logging": {"level": "debug"}}"#,
        );

        let config = load_config(&path).unwrap();
        assert_eq!(config.store.users_db, "users.json");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "vless.yaml", "xray:\n  config: /etc/xray.json\n");

        let config = load_config(&path).unwrap();
        assert_eq!(config.xray.config, "/etc/xray.json");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "vless.ini", "[store]");

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::UnsupportedFormat)
        ));
    }
}
