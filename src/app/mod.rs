//! Command-line front end: picks the config source, drives the engine and
//! turns failures into reports and exit codes.

use crate::core::ConfigProvider;
use crate::utils::validation::Validate;
use crate::{CliConfig, LayoutEngine, LayoutError, LocalStorage, Manifest, SorterPipeline, TomlConfig};

/// Runs one invocation and returns the process exit code.
pub fn execute(cli: &CliConfig) -> i32 {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config, cli.dry_run),
                Err(e) => {
                    eprintln!("[ERROR] Failed to load config file '{}'", path);
                    report_failure(&e)
                }
            }
        }
        None => run(cli.clone(), cli.dry_run),
    }
}

pub fn run<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> i32 {
    if let Err(e) = config.validate() {
        return report_failure(&e);
    }

    let storage = LocalStorage::new(config.base_dir().to_string());
    let engine = LayoutEngine::new(SorterPipeline::new(storage, config));

    if dry_run {
        tracing::info!("DRY RUN - the manifest will not be written");
        return match engine.plan() {
            Ok(manifest) => {
                print_summary(&manifest);
                0
            }
            Err(e) => report_failure(&e),
        };
    }

    match engine.run() {
        Ok(output_path) => {
            println!("Wrote: {}", output_path);
            0
        }
        Err(e) => report_failure(&e),
    }
}

/// Prints the validation report or the error line plus a hint.
pub fn report_failure(e: &LayoutError) -> i32 {
    tracing::error!("Run failed: {} (category: {:?})", e, e.category());

    match e.report() {
        Some(report) => {
            println!();
            print!("{}", report);
        }
        None => eprintln!("[ERROR] {}", e),
    }
    eprintln!("Hint: {}", e.recovery_suggestion());

    e.exit_code()
}

fn print_summary(manifest: &Manifest) {
    println!(
        "{} bins, {} slots, {} items placed, {} bins unassigned",
        manifest.bins.len(),
        manifest.slot_count(),
        manifest.assigned_items(),
        manifest.unassigned_bins()
    );
    for (category, bins, items) in manifest.category_summary() {
        let bins: Vec<String> = bins.iter().map(ToString::to_string).collect();
        println!("  - {}: {} items in {}", category, items, bins.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> CliConfig {
        CliConfig::parse_from(std::iter::once("sorter-layout").chain(args.iter().copied()))
    }

    fn write_inputs(dir: &Path, categories: &str, layout: &str) {
        std::fs::write(dir.join("categories.json"), categories).unwrap();
        std::fs::write(dir.join("category_layout.json"), layout).unwrap();
    }

    #[test]
    fn test_unreadable_config_file_exits_with_code_one() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        let config = cli(&["--config", missing.to_str().unwrap()]);
        assert_eq!(execute(&config), 1);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[input]\ncategories = ").unwrap();
        let config = cli(&["--config", broken.to_str().unwrap()]);
        assert_eq!(execute(&config), 1);
    }

    #[test]
    fn test_exit_codes_follow_the_failure_kind() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_str().unwrap();

        write_inputs(dir.path(), r#"{"Tools": ["Axe"]}"#, r#"{"Tools": ["A1"]}"#);
        assert_eq!(execute(&cli(&["--base-dir", base])), 0);
        assert!(dir.path().join("sorter_layout.csv").exists());

        write_inputs(dir.path(), r#"{"Tools": []}"#, r#"{"Misc": ["A1"]}"#);
        assert_eq!(execute(&cli(&["--base-dir", base])), 2);

        write_inputs(dir.path(), r#"{"Tools": []}"#, r#"{"Tools": ["A1", "A1"]}"#);
        assert_eq!(execute(&cli(&["--base-dir", base])), 3);

        assert_eq!(
            execute(&cli(&["--base-dir", base, "--start-letter", "X", "--end-letter", "A"])),
            1
        );
    }

    #[test]
    fn test_dry_run_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().to_str().unwrap();
        write_inputs(dir.path(), r#"{"Tools": ["Axe"]}"#, r#"{"Tools": ["A1"]}"#);

        assert_eq!(execute(&cli(&["--base-dir", base, "--dry-run"])), 0);
        assert!(!dir.path().join("sorter_layout.csv").exists());
    }
}
