pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::bins::{DEFAULT_END_LETTER, DEFAULT_START_LETTER};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_letter_range, validate_non_empty_string, validate_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sorter-layout")]
#[command(about = "Compile category and bin layout documents into a per-slot sorter manifest")]
pub struct CliConfig {
    /// Categories document: category -> list of item descriptions
    #[arg(long, default_value = "categories.json")]
    pub categories: String,

    /// Layout document: category -> list of bin ids
    #[arg(long, default_value = "category_layout.json")]
    pub layout: String,

    /// Manifest CSV to write
    #[arg(long, default_value = "sorter_layout.csv")]
    pub output: String,

    /// Directory relative paths resolve against
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    #[arg(long, default_value_t = DEFAULT_START_LETTER)]
    pub start_letter: char,

    #[arg(long, default_value_t = DEFAULT_END_LETTER)]
    pub end_letter: char,

    /// Category label for bins no category claims (e.g. "unassigned")
    #[arg(long, default_value = crate::core::emitter::DEFAULT_UNASSIGNED_LABEL)]
    pub unassigned_label: String,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Validate and pack, then print a summary without writing the manifest
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn categories_path(&self) -> &str {
        &self.categories
    }

    fn layout_path(&self) -> &str {
        &self.layout
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn start_letter(&self) -> char {
        self.start_letter
    }

    fn end_letter(&self) -> char {
        self.end_letter
    }

    fn unassigned_label(&self) -> &str {
        &self.unassigned_label
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("base_dir", &self.base_dir)?;
        validate_path("categories", &self.categories)?;
        validate_path("layout", &self.layout)?;
        validate_path("output", &self.output)?;
        validate_letter_range(self.start_letter, self.end_letter)?;
        validate_non_empty_string("unassigned_label", &self.unassigned_label)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["sorter-layout"]);
        assert_eq!(config.categories_path(), "categories.json");
        assert_eq!(config.layout_path(), "category_layout.json");
        assert_eq!(config.output_path(), "sorter_layout.csv");
        assert_eq!(config.start_letter(), 'A');
        assert_eq!(config.end_letter(), 'X');
        assert_eq!(config.unassigned_label(), "UNUSED");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "sorter-layout",
            "--layout",
            "data/layout.json",
            "--start-letter",
            "C",
            "--end-letter",
            "F",
            "--dry-run",
        ]);
        assert_eq!(config.layout_path(), "data/layout.json");
        assert_eq!(config.start_letter(), 'C');
        assert_eq!(config.end_letter(), 'F');
        assert!(config.dry_run);
    }

    #[test]
    fn test_rejects_reversed_range() {
        let config =
            CliConfig::parse_from(["sorter-layout", "--start-letter", "X", "--end-letter", "A"]);
        assert!(config.validate().is_err());
    }
}
