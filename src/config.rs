//! Client configuration from `config.toml` in the data directory, plus
//! the host-environment identity bridge. Everything here degrades: a
//! missing or corrupt config file means fully local single-user mode,
//! never a startup failure.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::remote::Identity;

/// `[remote]` section: where project CRUD is mirrored when configured.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// `[identity]` section: who this client acts as toward the remote.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
}

/// Read `config.toml` from the data directory. A missing file is an
/// empty config; a corrupt one is reported on stderr and ignored.
pub fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join("config.toml");
    if !path.exists() {
        return AppConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: could not parse {}: {}", path.display(), e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

/// Resolve the client identity. The host environment wins
/// (`TRAILHEAD_USER_ID` / `TRAILHEAD_USER_NAME`), then the config file.
/// `None` means local single-user mode.
pub fn identity(config: &AppConfig) -> Option<Identity> {
    if let Ok(external_id) = std::env::var("TRAILHEAD_USER_ID") {
        return Some(Identity {
            external_id,
            display_name: std::env::var("TRAILHEAD_USER_NAME").unwrap_or_default(),
        });
    }
    config.identity.as_ref().map(|id| Identity {
        external_id: id.external_id.clone(),
        display_name: id.display_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_means_local_mode() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path());
        assert!(config.remote.is_none());
        assert!(config.identity.is_none());
    }

    #[test]
    fn full_config_parses() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[remote]
base_url = "https://sync.example.org"
api_key = "secret"

[identity]
external_id = "42"
display_name = "Trail Tester"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path());
        let remote = config.remote.as_ref().unwrap();
        assert_eq!(remote.base_url, "https://sync.example.org");
        assert_eq!(remote.api_key.as_deref(), Some("secret"));
        assert_eq!(config.identity.as_ref().unwrap().external_id, "42");
    }

    #[test]
    fn corrupt_config_degrades_to_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "remote = [not toml").unwrap();
        let config = load_config(tmp.path());
        assert!(config.remote.is_none());
    }

    #[test]
    fn identity_comes_from_config_when_env_is_unset() {
        let config = AppConfig {
            remote: None,
            identity: Some(IdentityConfig {
                external_id: "7".into(),
                display_name: "Olga".into(),
            }),
        };
        // Assumes TRAILHEAD_USER_ID is unset in the test environment
        if std::env::var("TRAILHEAD_USER_ID").is_err() {
            let id = identity(&config).unwrap();
            assert_eq!(id.external_id, "7");
            assert_eq!(id.display_name, "Olga");
        }
    }
}
