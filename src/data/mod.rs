//! Data module - survey loading and reshaping

mod loader;
mod processor;

pub use loader::{DataLoader, SourceFormat};
pub use processor::{DataProcessor, COURSE_COL, RANK_COL};
