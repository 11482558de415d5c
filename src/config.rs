use std::path::Path;

use tracing::warn;

use crate::adversarial::AdversarialConfig;
use crate::error::ConfigError;
use crate::search::{HybridConfig, SearchConfig};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub adversarial: AdversarialConfig,
    pub hybrid: HybridConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adversarial.max_depth == 0 {
            return Err(ConfigError::Validation(
                "adversarial.max_depth must be >= 1".into(),
            ));
        }
        if self.hybrid.adversary_frequency == 0 {
            return Err(ConfigError::Validation(
                "hybrid.adversary_frequency must be >= 1".into(),
            ));
        }
        if self.hybrid.max_steps == 0 {
            return Err(ConfigError::Validation(
                "hybrid.max_steps must be > 0".into(),
            ));
        }
        if self.hybrid.max_depth == 0 {
            return Err(ConfigError::Validation(
                "hybrid.max_depth must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adversarial::EvaluatorKind;
    use crate::maze::HeuristicKind;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.search.dfs_max_depth, 10_000);
        assert_eq!(config.search.ids_max_depth, 1_000);
        assert_eq!(config.adversarial.max_depth, 4);
        assert_eq!(config.hybrid.adversary_radius, 3);
        assert_eq!(config.hybrid.adversary_frequency, 2);
        assert_eq!(config.hybrid.candidate_cap, 10);
        assert!(config.hybrid.use_alpha_beta);
        assert_eq!(config.hybrid.max_steps, 500);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[hybrid]
adversary_radius = 5
heuristic = "euclidean"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.hybrid.adversary_radius, 5);
        assert_eq!(config.hybrid.heuristic, HeuristicKind::Euclidean);
        // Other fields should be defaults
        assert_eq!(config.hybrid.max_depth, 4);
        assert_eq!(config.search.heuristic, HeuristicKind::Manhattan);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_heuristic_is_a_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[search]\nheuristic = \"octile\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_frequency() {
        let mut config = AppConfig::default();
        config.hybrid.adversary_frequency = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_zero_max_steps() {
        let mut config = AppConfig::default();
        config.hybrid.max_steps = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_adversarial_depth() {
        let mut config = AppConfig::default();
        config.adversarial.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_hybrid_depth() {
        let mut config = AppConfig::default();
        config.hybrid.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[adversarial]
max_depth = 6
evaluator = "windows"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.adversarial.max_depth, 6);
        assert_eq!(config.adversarial.evaluator, EvaluatorKind::Windows);
        // Others are defaults
        assert_eq!(config.hybrid.candidate_cap, 10);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[hybrid]\nadversary_frequency = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }
}
