pub mod bins;
pub mod emitter;
pub mod engine;
pub mod loader;
pub mod packer;
pub mod pipeline;
pub mod validator;

pub use crate::domain::model::{LayoutInputs, Manifest};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
