//! Durable local cart storage.
//!
//! The cart is persisted as a single JSON array of lines
//! (`[{id, name, price, quantity, image, category}, ...]`) under one fixed
//! location, mirroring a browser local-storage entry. The store is the only
//! writer; reads after startup go through the in-memory cart, not storage.

use std::{fs, io::ErrorKind, path::PathBuf};

use mockall::automock;
use thiserror::Error;
use tracing::warn;

use crate::cart::models::CartLine;

/// Load/save interface the cart store persists through.
#[automock]
pub trait CartStorage: Send + Sync {
    /// Loads the persisted cart.
    ///
    /// Absent state loads as an empty cart. Implementations also treat
    /// unparseable state as empty rather than failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read at all.
    fn load(&self) -> Result<Vec<CartLine>, StorageError>;

    /// Persists the full cart, replacing any previous state.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be written.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}

/// File-backed [`CartStorage`] holding one JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(StorageError::Io(error)),
        };

        match serde_json::from_str(&contents) {
            Ok(lines) => Ok(lines),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "stored cart is unparseable, starting empty");

                Ok(Vec::new())
            }
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string(lines)?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}

/// Errors reading or writing the local cart store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("cart storage io error")]
    Io(#[from] std::io::Error),

    /// The cart could not be serialized.
    #[error("cart serialization error")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::{cart::models::ItemId, money::Price};

    use super::*;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine {
                id: ItemId::from(1),
                name: "Cheeseburger".to_string(),
                unit_price: Price::from_cents(899),
                quantity: 1,
                image_url: "burger.jpg".to_string(),
                category: "Burgers".to_string(),
            },
            CartLine {
                id: ItemId::from(4),
                name: "Spicy Tacos".to_string(),
                unit_price: Price::from_cents(799),
                quantity: 2,
                image_url: "tacos.jpg".to_string(),
                category: "Tacos".to_string(),
            },
        ]
    }

    #[test]
    fn missing_file_loads_empty() -> TestResult {
        let dir = tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        assert_eq!(storage.load()?, Vec::new());

        Ok(())
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let dir = tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.save(&lines())?;

        assert_eq!(storage.load()?, lines());

        Ok(())
    }

    #[test]
    fn unparseable_file_loads_empty() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json")?;

        let storage = JsonFileStorage::new(path);

        assert_eq!(storage.load()?, Vec::new());

        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directory() -> TestResult {
        let dir = tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("state").join("cart.json"));

        storage.save(&lines())?;

        assert_eq!(storage.load()?, lines());

        Ok(())
    }

    #[test]
    fn stored_json_is_the_fixed_array_layout() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("cart.json");
        let storage = JsonFileStorage::new(&path);

        storage.save(&lines())?;

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let first = raw.get(0).ok_or("expected a non-empty array")?;

        assert_eq!(first["id"], serde_json::json!("1"));
        assert_eq!(first["price"], serde_json::json!(8.99));
        assert_eq!(first["image"], serde_json::json!("burger.jpg"));

        Ok(())
    }
}
