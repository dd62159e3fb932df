pub mod etl;
pub mod joiner;
pub mod pipeline;

pub use crate::domain::model::{CombinedRecord, JoinResult, SourceDocuments};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
