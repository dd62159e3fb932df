use crate::domain::model::{JoinResult, SourceDocuments};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Human-readable location of `path`, used in logs and error messages.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider {
    fn base_dir(&self) -> &str;
    fn price_file(&self) -> &str;
    fn detail_file(&self) -> &str;
    fn output_file(&self) -> &str;
    fn echo_stdout(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<SourceDocuments>;
    fn transform(&self, sources: SourceDocuments) -> Result<JoinResult>;
    fn load(&self, result: JoinResult) -> Result<String>;
}
