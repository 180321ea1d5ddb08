use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::Result;
use dirs::{config_dir, data_dir};
use passkeep_gen::PasswordRules;
use serde::{Deserialize, Serialize};

/// User-level configuration loaded from `~/.config/passkeep/config.toml`
/// (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the encrypted vault file location.
    pub vault_path: Option<PathBuf>,
    /// Defaults for generated passwords (optional).
    pub generator: Option<GeneratorConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: Option<usize>,
    pub symbols: Option<bool>,
}

impl Config {
    /// Password-generation defaults with configured overrides applied.
    pub fn generator_rules(&self) -> PasswordRules {
        let mut rules = PasswordRules::default();
        if let Some(generator) = &self.generator {
            if let Some(length) = generator.length {
                rules.length = length;
            }
            if let Some(symbols) = generator.symbols {
                rules.symbols = symbols;
            }
        }
        rules
    }
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config = toml::from_str(&contents)?;
    Ok(cfg)
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("passkeep").join("config.toml"))
}

/// Resolve the vault file: CLI flag first, then config, then the
/// platform data directory.
pub fn vault_path(cli_override: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path);
    }
    if let Some(path) = &config.vault_path {
        return Ok(path.clone());
    }
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("passkeep").join("passwords.enc"))
}

/// Write the given config to the default path, creating parent
/// directories as needed. An existing file is left untouched and its
/// path returned.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    let path = default_path()?;
    if path.exists() {
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn parses_custom_config() {
        let contents = r#"
            vault_path = "/tmp/passkeep-test/vault.enc"
            [generator]
            length = 24
            symbols = false
        "#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(
            cfg,
            Config {
                vault_path: Some(PathBuf::from("/tmp/passkeep-test/vault.enc")),
                generator: Some(GeneratorConfig {
                    length: Some(24),
                    symbols: Some(false),
                }),
            }
        );
    }

    #[test]
    fn generator_rules_apply_configured_overrides() {
        let cfg = Config {
            vault_path: None,
            generator: Some(GeneratorConfig {
                length: Some(32),
                symbols: Some(false),
            }),
        };
        let rules = cfg.generator_rules();
        assert_eq!(rules.length, 32);
        assert!(!rules.symbols);
        assert!(rules.uppercase);
        assert!(rules.lowercase);
        assert!(rules.digits);
    }

    #[test]
    fn cli_override_wins_over_config_vault_path() {
        let cfg = Config {
            vault_path: Some(PathBuf::from("/tmp/from-config.enc")),
            generator: None,
        };
        let resolved =
            vault_path(Some(PathBuf::from("/tmp/from-flag.enc")), &cfg).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/tmp/from-flag.enc"));

        let resolved = vault_path(None, &cfg).expect("resolve");
        assert_eq!(resolved, PathBuf::from("/tmp/from-config.enc"));
    }

    #[test]
    fn write_default_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let cfg = Config {
            vault_path: Some(PathBuf::from("/tmp/passkeep-test/vault.enc")),
            generator: None,
        };

        write_to_path_if_missing(&cfg, &path).expect("write should succeed");
        let second = write_to_path_if_missing(&cfg, &path).expect("second write ok");
        assert_eq!(second, path);
        let loaded: Config =
            toml::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(loaded, cfg);
    }

    fn write_to_path_if_missing(config: &Config, path: &Path) -> Result<PathBuf> {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(config)?;
        fs::write(path, body)?;
        Ok(path.to_path_buf())
    }
}
