use crate::core::Storage;
use crate::utils::error::{JoinError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => JoinError::FileNotFound {
                path: full_path.display().to_string(),
            },
            _ => JoinError::IoError(e),
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_maps_to_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        match storage.read_file("jsonA.json") {
            Err(JoinError::FileNotFound { path }) => assert!(path.ends_with("jsonA.json")),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("nested/out.json", b"[]").unwrap();
        assert_eq!(storage.read_file("nested/out.json").unwrap(), b"[]");
    }
}
