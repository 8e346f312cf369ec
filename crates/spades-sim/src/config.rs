use serde::Deserialize;
use spades_core::analysis::NilRule;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_ITERATIONS: u64 = 1_000;
const DEFAULT_EXPOSURE_STATE: &str = "spades.json";
const DEFAULT_NIL_STATE: &str = "spades_nil.json";
const DEFAULT_NIL_FORCED_STATE: &str = "spades_nil_force.json";
const DEFAULT_LOG_PATH: &str = "spades.log.jsonl";

/// Root simulation configuration, optionally loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Worker threads; 0 lets rayon pick.
    #[serde(default)]
    pub threads: usize,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            threads: 0,
            state: StateConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.iterations == 0 {
            return Err(ValidationError::InvalidField {
                field: "iterations".to_string(),
                message: "iterations must be greater than zero".to_string(),
            });
        }
        self.state.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Where accumulated tallies live between runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateConfig {
    #[serde(default = "default_exposure_state")]
    pub exposure: PathBuf,
    #[serde(default = "default_nil_state")]
    pub nil: PathBuf,
    #[serde(default = "default_nil_forced_state")]
    pub nil_forced: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            exposure: default_exposure_state(),
            nil: default_nil_state(),
            nil_forced: default_nil_forced_state(),
        }
    }
}

impl StateConfig {
    /// Each nil rule keeps its own file so the two result sets never mix.
    pub fn nil_path(&self, rule: NilRule) -> &Path {
        match rule {
            NilRule::Standard => &self.nil,
            NilRule::OpponentsForced => &self.nil_forced,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("state.exposure", &self.exposure),
            ("state.nil", &self.nil),
            ("state.nil_forced", &self.nil_forced),
        ] {
            if value.as_os_str().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }

        for (label, value, other_label, other) in [
            ("state.nil", &self.nil, "state.exposure", &self.exposure),
            ("state.nil_forced", &self.nil_forced, "state.exposure", &self.exposure),
            ("state.nil_forced", &self.nil_forced, "state.nil", &self.nil),
        ] {
            if value == other {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: format!("must differ from {other_label}"),
                });
            }
        }

        Ok(())
    }
}

fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

fn default_exposure_state() -> PathBuf {
    PathBuf::from(DEFAULT_EXPOSURE_STATE)
}

fn default_nil_state() -> PathBuf {
    PathBuf::from(DEFAULT_NIL_STATE)
}

fn default_nil_forced_state() -> PathBuf {
    PathBuf::from(DEFAULT_NIL_FORCED_STATE)
}

/// Console logging is always on; structured JSON logs are opt-in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.log_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.log_path".to_string(),
                message: "structured logging needs a file path".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BASIC_YAML: &str = r#"
iterations: 5000
seed: 42
threads: 2
state:
  exposure: "out/exposure.json"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimulationConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.iterations, 5000);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.state.exposure, PathBuf::from("out/exposure.json"));
        assert_eq!(cfg.state.nil, PathBuf::from(DEFAULT_NIL_STATE));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.log_path, PathBuf::from(DEFAULT_LOG_PATH));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: SimulationConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg, SimulationConfig::default());
    }

    #[test]
    fn rejects_zero_iterations() {
        let yaml = BASIC_YAML.replace("iterations: 5000", "iterations: 0");
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "iterations"
        ));
    }

    #[test]
    fn rejects_shared_nil_state() {
        let yaml = "state:\n  nil: same.json\n  nil_forced: same.json\n";
        let mut cfg: SimulationConfig = serde_yaml::from_str(yaml).expect("parse");
        let err = cfg.validate().expect_err("shared path should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "state.nil_forced"
        ));
    }

    #[test]
    fn rejects_nil_state_shared_with_exposure() {
        for (yaml, field) in [
            ("state:\n  exposure: same.json\n  nil: same.json\n", "state.nil"),
            (
                "state:\n  exposure: same.json\n  nil_forced: same.json\n",
                "state.nil_forced",
            ),
        ] {
            let mut cfg: SimulationConfig = serde_yaml::from_str(yaml).expect("parse");
            let err = cfg.validate().expect_err("shared path should fail");
            assert!(matches!(
                err,
                ValidationError::InvalidField { field: actual, message }
                    if actual == field && message.contains("state.exposure")
            ));
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"chatty\"");
        let mut cfg: SimulationConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("unknown level");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.tracing_level"
        ));
    }

    #[test]
    fn nil_rules_map_to_separate_files() {
        let state = StateConfig::default();
        assert_ne!(
            state.nil_path(NilRule::Standard),
            state.nil_path(NilRule::OpponentsForced)
        );
    }

    #[test]
    fn from_path_reports_location() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sim.yaml");
        let mut file = File::create(&path).expect("create");
        file.write_all(b"iterations: [oops").expect("write");

        let err = SimulationConfig::from_path(&path).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());

        let missing = dir.path().join("missing.yaml");
        let err = SimulationConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
