use crate::domain::model::{LayoutInputs, Manifest};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Writes `data` and returns the absolute path written to.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    /// Directory that relative input and output paths resolve against.
    fn base_dir(&self) -> &str;
    fn categories_path(&self) -> &str;
    fn layout_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn start_letter(&self) -> char;
    fn end_letter(&self) -> char;
    fn unassigned_label(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<LayoutInputs>;
    fn transform(&self, inputs: LayoutInputs) -> Result<Manifest>;
    fn load(&self, manifest: Manifest) -> Result<String>;
}
