//! Persistent storage for winners' gene data.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::schema::GeneData;

/// Key-value store of genomes, each genome being an ordered list of genes.
pub trait GeneStore {
    /// Genomes stored under `key`, empty if none.
    fn read_genomes(&self, key: &str) -> Result<Vec<Vec<GeneData>>, StorageError>;

    /// Replace the genomes stored under `key`.
    fn write_genomes(&mut self, key: &str, genomes: &[Vec<GeneData>]) -> Result<(), StorageError>;
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Gene store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Gene store holds invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryGeneStore {
    entries: HashMap<String, Vec<Vec<GeneData>>>,
}

impl MemoryGeneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with stored genomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GeneStore for MemoryGeneStore {
    fn read_genomes(&self, key: &str) -> Result<Vec<Vec<GeneData>>, StorageError> {
        Ok(self.entries.get(key).cloned().unwrap_or_default())
    }

    fn write_genomes(&mut self, key: &str, genomes: &[Vec<GeneData>]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), genomes.to_vec());
        Ok(())
    }
}

/// Store keeping one pretty-printed JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct JsonGeneStore {
    dir: PathBuf,
}

impl JsonGeneStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl GeneStore for JsonGeneStore {
    fn read_genomes(&self, key: &str) -> Result<Vec<Vec<GeneData>>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_genomes(&mut self, key: &str, genomes: &[Vec<GeneData>]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(genomes)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }
}
