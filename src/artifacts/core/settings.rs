//! Application settings
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. a TOML file (`--config`, or `gitviz.toml` in the working directory when present)
//! 2. `GITVIZ_*` environment variables
//! 3. command-line flags, applied by the caller
//!
//! ```toml
//! repository_path = "../my-project"
//! branch = "master"
//! plantuml_path = "/opt/plantuml/plantuml.jar"
//! start_date = 2024-01-01
//! walk_policy = "dedup"
//! ```

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::graph::walker::{WalkOptions, WalkPolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "gitviz.toml";
const ENV_PREFIX: &str = "GITVIZ_";
const DATE_FORMAT: &str = "%Y-%m-%d";

mod defaults {
    use std::path::PathBuf;

    pub fn repository_path() -> PathBuf {
        ".".into()
    }
    pub fn branch() -> String {
        "master".to_string()
    }
    pub fn java_path() -> String {
        "java".to_string()
    }
    pub fn output_path() -> PathBuf {
        "graph.puml".into()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unable to read settings file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Working tree containing the `.git` directory
    pub repository_path: PathBuf,
    /// Branch whose tip starts the walk
    pub branch: String,
    /// PlantUML jar; rendering is only possible when set
    pub plantuml_path: Option<PathBuf>,
    pub java_path: String,
    /// Where the diagram text is written
    pub output_path: PathBuf,
    /// Where rendered images go, next to the diagram file when unset
    pub output_dir: Option<PathBuf>,
    /// Lower bound for commit listings
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: Option<NaiveDate>,
    pub walk_policy: WalkPolicy,
    pub max_depth: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            repository_path: defaults::repository_path(),
            branch: defaults::branch(),
            plantuml_path: None,
            java_path: defaults::java_path(),
            output_path: defaults::output_path(),
            output_dir: None,
            start_date: None,
            walk_policy: WalkPolicy::default(),
            max_depth: None,
        }
    }
}

impl Settings {
    /// Load the file layer and the environment layer
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from `GITVIZ_<FIELD>` variables found through `lookup`
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(value) = var("REPOSITORY_PATH") {
            self.repository_path = value.into();
        }
        if let Some(value) = var("BRANCH") {
            self.branch = value;
        }
        if let Some(value) = var("PLANTUML_PATH") {
            self.plantuml_path = Some(value.into());
        }
        if let Some(value) = var("JAVA_PATH") {
            self.java_path = value;
        }
        if let Some(value) = var("OUTPUT_PATH") {
            self.output_path = value.into();
        }
        if let Some(value) = var("OUTPUT_DIR") {
            self.output_dir = Some(value.into());
        }
        if let Some(value) = var("START_DATE") {
            self.start_date = Some(parse_date(&format!("{ENV_PREFIX}START_DATE"), &value)?);
        }
        if let Some(value) = var("WALK_POLICY") {
            self.walk_policy = match value.as_str() {
                "expand" => WalkPolicy::Expand,
                "dedup" => WalkPolicy::Dedup,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: format!("{ENV_PREFIX}WALK_POLICY"),
                        value,
                        reason: "must be 'expand' or 'dedup'".to_string(),
                    });
                }
            };
        }
        if let Some(value) = var("MAX_DEPTH") {
            self.max_depth = Some(value.parse().map_err(|e| ConfigError::InvalidValue {
                key: format!("{ENV_PREFIX}MAX_DEPTH"),
                value: value.clone(),
                reason: format!("must be a positive integer: {e}"),
            })?);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        BranchName::try_parse(self.branch.clone()).map_err(|e| ConfigError::InvalidValue {
            key: "branch".to_string(),
            value: self.branch.clone(),
            reason: e.to_string(),
        })?;

        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "max_depth".to_string(),
                value: "0".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }

        Ok(())
    }

    pub fn branch_name(&self) -> anyhow::Result<BranchName> {
        BranchName::try_parse(self.branch.clone())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            policy: self.walk_policy,
            max_depth: self.max_depth,
        }
    }

    /// Directory for rendered images
    pub fn render_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => match self.output_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: format!("expected YYYY-MM-DD: {e}"),
    })
}

/// Accept both a TOML date (`2024-01-01`) and a string (`"2024-01-01"`)
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match toml::Value::deserialize(deserializer)? {
        toml::Value::Datetime(date) => date.to_string(),
        toml::Value::String(text) => text,
        other => {
            return Err(serde::de::Error::custom(format!(
                "start_date must be a date, got {}",
                other.type_str()
            )));
        }
    };

    parse_date("start_date", &text)
        .map(Some)
        .map_err(serde::de::Error::custom)
}
