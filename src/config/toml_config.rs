use crate::core::bins::{DEFAULT_END_LETTER, DEFAULT_START_LETTER};
use crate::core::emitter::DEFAULT_UNASSIGNED_LABEL;
use crate::core::ConfigProvider;
use crate::utils::error::{LayoutError, Result};
use crate::utils::validation::{
    parse_letter, validate_letter_range, validate_non_empty_string, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub bins: Option<BinsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub categories: String,
    pub layout: String,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub unassigned_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinsConfig {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LayoutError::MissingFile {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LayoutError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn letter(value: Option<&String>, default: char) -> char {
        value.and_then(|v| v.chars().next()).unwrap_or(default)
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(base_dir) = &self.input.base_dir {
            validate_path("input.base_dir", base_dir)?;
        }
        validate_path("input.categories", &self.input.categories)?;
        validate_path("input.layout", &self.input.layout)?;
        validate_path("output.path", &self.output.path)?;

        if let Some(label) = &self.output.unassigned_label {
            validate_non_empty_string("output.unassigned_label", label)?;
        }

        if let Some(bins) = &self.bins {
            if let Some(start) = &bins.start {
                parse_letter("bins.start", start)?;
            }
            if let Some(end) = &bins.end {
                parse_letter("bins.end", end)?;
            }
        }
        validate_letter_range(self.start_letter(), self.end_letter())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_dir(&self) -> &str {
        self.input.base_dir.as_deref().unwrap_or(".")
    }

    fn categories_path(&self) -> &str {
        &self.input.categories
    }

    fn layout_path(&self) -> &str {
        &self.input.layout
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn start_letter(&self) -> char {
        Self::letter(
            self.bins.as_ref().and_then(|b| b.start.as_ref()),
            DEFAULT_START_LETTER,
        )
    }

    fn end_letter(&self) -> char {
        Self::letter(
            self.bins.as_ref().and_then(|b| b.end.as_ref()),
            DEFAULT_END_LETTER,
        )
    }

    fn unassigned_label(&self) -> &str {
        self.output
            .unassigned_label
            .as_deref()
            .unwrap_or(DEFAULT_UNASSIGNED_LABEL)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
