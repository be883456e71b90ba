use crate::error::Result;
use crate::options::InvalidOptionPolicy;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// DocumentFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Typed sequence document (YAML or JSON by file extension).
    #[default]
    Typed,
    /// Legacy JSON array with per-beat attribute maps.
    Legacy,
}

impl std::str::FromStr for DocumentFormat {
    type Err = crate::error::TkaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "typed" => Ok(DocumentFormat::Typed),
            "legacy" => Ok(DocumentFormat::Legacy),
            _ => Err(crate::error::TkaError::Document(format!(
                "unknown document format '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuityConfig {
    /// Repair sequences before they are written back to disk.
    #[serde(default = "default_auto_repair")]
    pub auto_repair: bool,
}

fn default_auto_repair() -> bool {
    true
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            auto_repair: default_auto_repair(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default)]
    pub on_invalid: InvalidOptionPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default)]
    pub format: DocumentFormat,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub continuity: ContinuityConfig,
    #[serde(default)]
    pub options: OptionsConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
}

const SUPPORTED_VERSION: u32 = 1;

fn default_version() -> u32 {
    SUPPORTED_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            continuity: ContinuityConfig::default(),
            options: OptionsConfig::default(),
            documents: DocumentsConfig::default(),
        }
    }
}

impl Config {
    /// Load `.tka/config.yaml` under `root`, or defaults if there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Write the default config unless one exists. Returns true if written.
    pub fn init(root: &Path) -> Result<bool> {
        let data = serde_yaml::to_string(&Config::default())?;
        crate::io::write_if_missing(&paths::config_path(root), data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version > SUPPORTED_VERSION {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "config version {} is newer than supported version {}",
                    self.version, SUPPORTED_VERSION
                ),
            });
        } else if self.version == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "config version 0 is not a valid version; assuming 1".to_string(),
            });
        }

        if self.documents.format == DocumentFormat::Legacy && !self.continuity.auto_repair {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "legacy documents are saved without repair; \
                          stored orientations may be discontinuous"
                    .to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.version, 1);
        assert!(parsed.continuity.auto_repair);
        assert_eq!(parsed.options.on_invalid, InvalidOptionPolicy::Fail);
        assert_eq!(parsed.documents.format, DocumentFormat::Typed);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let cfg: Config = serde_yaml::from_str("options:\n  on_invalid: skip\n").unwrap();
        assert_eq!(cfg.options.on_invalid, InvalidOptionPolicy::Skip);
        assert!(cfg.continuity.auto_repair);
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.version, 1);
    }

    #[test]
    fn init_then_load() {
        let dir = TempDir::new().unwrap();
        assert!(Config::init(dir.path()).unwrap());
        assert!(!Config::init(dir.path()).unwrap());
        assert_eq!(Config::load(dir.path()).unwrap().documents.format, DocumentFormat::Typed);
        std::fs::write(
            paths::config_path(dir.path()),
            "documents:\n  format: legacy\n",
        )
        .unwrap();
        let reloaded = Config::load(dir.path()).unwrap();
        assert_eq!(reloaded.documents.format, DocumentFormat::Legacy);
    }

    #[test]
    fn validate_flags_future_version() {
        let cfg = Config {
            version: 7,
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Error);
    }

    #[test]
    fn validate_flags_unrepaired_legacy_saves() {
        let mut cfg = Config::default();
        cfg.documents.format = DocumentFormat::Legacy;
        cfg.continuity.auto_repair = false;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(Config::default().validate().is_empty());
    }
}
