use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Files rooted at the configured output directory.
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
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("out");
        let storage = LocalStorage::new(root.to_string_lossy().into_owned());

        storage.write_file("index.html", b"<html></html>").await.unwrap();

        assert_eq!(fs::read(root.join("index.html")).unwrap(), b"<html></html>");
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_page() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());

        storage.write_file("map.json", b"{\"old\":true}").await.unwrap();
        storage.write_file("map.json", b"{}").await.unwrap();

        assert_eq!(fs::read(temp_dir.path().join("map.json")).unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_write_into_a_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("taken");
        fs::write(&blocker, b"").unwrap();
        let storage = LocalStorage::new(blocker.to_string_lossy().into_owned());

        assert!(storage.write_file("index.html", b"x").await.is_err());
    }
}
