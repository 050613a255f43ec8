//! Named mouse spots persisted as JSON
//!
//! File format: `{ "<lowercase name>": { "x": 10, "y": 20 }, ... }`,
//! rewritten in full on every mutation.

use crate::core::error::Result;
use crate::core::types::Point;
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
pub struct SpotStore {
    path: PathBuf,
    spots: RwLock<AHashMap<String, Point>>,
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// `spots.json` -> `spots.json.bak`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

impl SpotStore {
    /// Open the store at `path`, loading existing spots if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let spots = Self::load(&path)?;
        tracing::info!(path = %path.display(), count = spots.len(), "spot store loaded");
        Ok(Self {
            path,
            spots: RwLock::new(spots),
        })
    }

    fn load(path: &Path) -> Result<AHashMap<String, Point>> {
        if !path.exists() {
            return Ok(AHashMap::new());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(AHashMap::new());
        }
        match serde_json::from_str::<AHashMap<String, Point>>(&content) {
            Ok(spots) => Ok(spots
                .into_iter()
                .map(|(name, point)| (normalize_name(&name), point))
                .collect()),
            Err(e) => {
                // Keep the bad file so the next save does not destroy it
                let backup = backup_path(path);
                std::fs::rename(path, &backup)?;
                tracing::warn!(
                    path = %path.display(),
                    backup = %backup.display(),
                    "unreadable spot file moved aside: {}",
                    e
                );
                Ok(AHashMap::new())
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, AHashMap<String, Point>> {
        self.spots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AHashMap<String, Point>> {
        self.spots.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, spots: &AHashMap<String, Point>) -> Result<()> {
        let sorted: BTreeMap<&String, &Point> = spots.iter().collect();
        let json = serde_json::to_string_pretty(&sorted)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store (or overwrite) a spot and persist immediately
    pub fn set(&self, name: &str, point: Point) -> Result<()> {
        let name = normalize_name(name);
        let mut spots = self.write();
        spots.insert(name.clone(), point);
        self.persist(&spots)?;
        tracing::info!(name, x = point.x, y = point.y, "spot remembered");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Point> {
        self.read().get(&normalize_name(name)).copied()
    }

    /// Remove a spot; returns whether it existed
    pub fn delete(&self, name: &str) -> Result<bool> {
        let name = normalize_name(name);
        let mut spots = self.write();
        let existed = spots.remove(&name).is_some();
        if existed {
            self.persist(&spots)?;
            tracing::info!(name, "spot forgotten");
        }
        Ok(existed)
    }

    pub fn clear(&self) -> Result<()> {
        let mut spots = self.write();
        spots.clear();
        self.persist(&spots)?;
        tracing::info!("all spots forgotten");
        Ok(())
    }

    /// Stored names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
