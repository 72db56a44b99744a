use crate::core::bins::BinSpace;
use crate::core::{emitter, loader, packer, validator};
use crate::core::{ConfigProvider, LayoutInputs, Manifest, Pipeline, Storage};
use crate::domain::model::Mapping;
use crate::utils::error::Result;
use std::path::Path;

pub struct SorterPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SorterPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_mapping(&self, path: &str) -> Result<Mapping> {
        tracing::debug!("Reading {}", path);
        let data = self.storage.read_file(path)?;
        loader::parse_mapping_bytes(&data, display_name(path))
    }
}

/// File name used in reports, e.g. `categories.json` for `data/categories.json`.
pub fn display_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

impl<S: Storage, C: ConfigProvider> Pipeline for SorterPipeline<S, C> {
    fn extract(&self) -> Result<LayoutInputs> {
        let categories = self.read_mapping(self.config.categories_path())?;
        let layout = self.read_mapping(self.config.layout_path())?;
        Ok(LayoutInputs { categories, layout })
    }

    fn transform(&self, inputs: LayoutInputs) -> Result<Manifest> {
        validator::validate_inputs(
            &inputs.categories,
            &inputs.layout,
            display_name(self.config.categories_path()),
            display_name(self.config.layout_path()),
        )
        .into_result()?;

        let space = BinSpace::generate(self.config.start_letter(), self.config.end_letter())?;
        tracing::debug!("Generated {} bins ({})", space.len(), space.range_label());

        packer::build_manifest(&space, &inputs.categories, &inputs.layout)
    }

    fn load(&self, manifest: Manifest) -> Result<String> {
        let data = emitter::render_manifest(&manifest, self.config.unassigned_label())?;
        self.storage.write_file(self.config.output_path(), &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MemoryStorage {
        fn with(files: &[(&str, &str)]) -> Self {
            let storage = Self::default();
            for (path, text) in files {
                storage
                    .files
                    .borrow_mut()
                    .insert(path.to_string(), text.as_bytes().to_vec());
            }
            storage
        }
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| crate::utils::error::LayoutError::MissingFile {
                    path: path.to_string(),
                })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(format!("/mem/{}", path))
        }
    }

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn base_dir(&self) -> &str {
            "."
        }
        fn categories_path(&self) -> &str {
            "in/categories.json"
        }
        fn layout_path(&self) -> &str {
            "in/category_layout.json"
        }
        fn output_path(&self) -> &str {
            "out.csv"
        }
        fn start_letter(&self) -> char {
            'A'
        }
        fn end_letter(&self) -> char {
            'B'
        }
        fn unassigned_label(&self) -> &str {
            "UNUSED"
        }
    }

    #[test]
    fn test_full_run_against_memory_storage() {
        let storage = MemoryStorage::with(&[
            ("in/categories.json", r#"{"Tools": ["saw", "Axe"]}"#),
            ("in/category_layout.json", r#"{"Tools": ["B2"]}"#),
        ]);
        let pipeline = SorterPipeline::new(storage, TestConfig);

        let inputs = pipeline.extract().unwrap();
        let manifest = pipeline.transform(inputs).unwrap();
        assert_eq!(manifest.bins.len(), 4);
        let path = pipeline.load(manifest).unwrap();
        assert_eq!(path, "/mem/out.csv");

        let files = pipeline.storage.files.borrow();
        let text = String::from_utf8(files["out.csv"].clone()).unwrap();
        assert_eq!(text.lines().count(), 1 + 4 * 9);
        assert!(text.contains("28,B2-1,B,2,1,Tools,Axe,,"));
        assert!(text.contains("29,B2-2,B,2,2,Tools,saw,,"));
    }

    #[test]
    fn test_reports_use_file_names() {
        let storage = MemoryStorage::with(&[
            ("in/categories.json", r#"{"Tools": []}"#),
            ("in/category_layout.json", r#"{"Misc": ["A1"]}"#),
        ]);
        let pipeline = SorterPipeline::new(storage, TestConfig);
        let inputs = pipeline.extract().unwrap();
        let err = pipeline.transform(inputs).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.categories_name, "categories.json");
        assert_eq!(report.layout_name, "category_layout.json");
    }

    #[test]
    fn test_missing_input_fails_extract() {
        let pipeline = SorterPipeline::new(MemoryStorage::default(), TestConfig);
        assert!(matches!(
            pipeline.extract(),
            Err(crate::utils::error::LayoutError::MissingFile { .. })
        ));
    }
}
