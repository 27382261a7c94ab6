use quiver_import_engine::{ConvertOptions, LanguageAliases};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where notebooks go when no output path is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,
    pub strip_toc: bool,
    pub reduce_headers: bool,
    pub dedupe_images: bool,
    /// Extra fence-tag aliases on top of the built-in `bash = "sh"`
    pub language_aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = ConvertOptions::default();
        Self {
            output_root: None,
            strip_toc: defaults.strip_toc,
            reduce_headers: defaults.reduce_headers,
            dedupe_images: defaults.dedupe_images,
            language_aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the configured output path
        config.output_root = config
            .output_root
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/quiver-import");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Conversion options described by this config
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            strip_toc: self.strip_toc,
            reduce_headers: self.reduce_headers,
            dedupe_images: self.dedupe_images,
            language_aliases: LanguageAliases::with_extra(self.language_aliases.clone()),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/quiver-import/config.toml"));
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let options = Config::default().convert_options();
        assert_eq!(options, ConvertOptions::default());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            output_root: Some(PathBuf::from("/tmp/notebooks")),
            strip_toc: false,
            dedupe_images: true,
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_language_aliases_extend_builtin() {
        let config: Config = toml::from_str(
            r#"
[language_aliases]
js = "javascript"
"#,
        )
        .unwrap();

        let aliases = config.convert_options().language_aliases;
        assert_eq!(aliases.resolve("js"), "javascript");
        assert_eq!(aliases.resolve("bash"), "sh");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "strip_toc = \"yes please\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            output_root: Some(PathBuf::from("/tmp/export")),
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "output_root = \"$QUIVER_EXPORT_ROOT/books\"").unwrap();

        unsafe {
            env::set_var("QUIVER_EXPORT_ROOT", "/custom/export");
        }

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.output_root,
            Some(PathBuf::from("/custom/export/books"))
        );

        unsafe {
            env::remove_var("QUIVER_EXPORT_ROOT");
        }
    }
}
