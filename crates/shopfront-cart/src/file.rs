//! JSON-file cart repository.
//!
//! The file plays the role of the browser's local-storage key: it holds a
//! JSON array of [`CartLine`]s and nothing else.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use shopfront_core::CartLine;

use crate::error::CartError;
use crate::repository::CartRepository;

#[derive(Debug, Clone)]
pub struct JsonFileCartRepository {
    path: PathBuf,
}

impl JsonFileCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> CartError {
        CartError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartRepository for JsonFileCartRepository {
    fn read(&self) -> Result<Vec<CartLine>, CartError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_error(e)),
        };

        match serde_json::from_slice::<Vec<CartLine>>(&raw) {
            Ok(lines) => Ok(lines),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "cart snapshot is corrupt; treating cart as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Writes the snapshot to a uniquely named temp file in the target's
    /// directory and renames it over the target, so readers never observe a
    /// half-written cart and concurrent writers never share a temp file.
    fn write(&self, lines: &[CartLine]) -> Result<(), CartError> {
        let encoded = serde_json::to_vec_pretty(lines)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.storage_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.storage_error(e))?;
        tmp.write_all(&encoded).map_err(|e| self.storage_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.storage_error(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn line(id: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: id.to_string(),
            title: format!("Product {id}"),
            price: Decimal::new(500, 2),
            sku: format!("SKU-{id}"),
            color_id: "c1".to_string(),
            color_name: "Red".to_string(),
            color_hex_code: "#f00".to_string(),
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn missing_file_reads_as_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCartRepository::new(dir.path().join("cart.json"));
        assert!(repo.read().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, b"{not json").unwrap();
        let repo = JsonFileCartRepository::new(&path);
        assert!(repo.read().unwrap().is_empty());
    }

    #[test]
    fn write_creates_parent_dirs_and_persists_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("cart.json");
        let repo = JsonFileCartRepository::new(&path);

        repo.write(&[line("a", 1), line("b", 4)]).unwrap();

        let reread = JsonFileCartRepository::new(&path).read().unwrap();
        assert_eq!(reread, vec![line("a", 1), line("b", 4)]);
        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["cart.json"]);
    }

    #[test]
    fn concurrent_writers_all_succeed_and_leave_one_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let handles: Vec<_> = (0..8u32)
            .map(|n| {
                let repo = JsonFileCartRepository::new(&path);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        repo.write(&[line(&format!("p{n}"), n + 1)]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = JsonFileCartRepository::new(&path).read().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product_id, format!("p{}", lines[0].quantity - 1));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_replaces_whole_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCartRepository::new(dir.path().join("cart.json"));
        repo.write(&[line("a", 1), line("b", 2)]).unwrap();
        repo.write(&[line("c", 3)]).unwrap();
        assert_eq!(repo.read().unwrap(), vec![line("c", 3)]);
    }

    #[test]
    fn reads_snapshot_with_legacy_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(
            &path,
            br##"[{"productId":"p1","title":"Chair","price":20,"sku":"CH","color":"c-red","colorName":"Red","colorHexCode":"#f00","image":"chair.png","quantity":2}]"##,
        )
        .unwrap();
        let lines = JsonFileCartRepository::new(&path).read().unwrap();
        assert_eq!(lines[0].color_id, "c-red");
        assert_eq!(lines[0].image_url, "chair.png");
    }
}
