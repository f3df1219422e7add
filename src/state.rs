use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

// State file names
pub const TOKEN_FILE: &str = ".gh-token";
pub const LAST_ORG_FILE: &str = ".last-repo";

/// Directory holding the small text values kept between runs
#[derive(Debug, Clone)]
pub struct StateDir {
    dir: PathBuf,
}

impl StateDir {
    /// Open a state directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create state directory: {:?}", dir))?;
        Ok(Self { dir })
    }

    /// Get a handle on a file inside the directory
    pub fn file(&self, filename: &str) -> StateFile {
        StateFile {
            path: self.dir.join(filename),
        }
    }
}

/// A single-line plain text file
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the trimmed contents; `None` when missing or blank
    pub fn load(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {:?}", self.path))?;
        let value = content.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value.to_string()))
        }
    }

    /// Replace the whole file; readers never observe a partial write
    pub fn save(&self, value: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        tmp.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write state file: {:?}", self.path))?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace state file: {:?}", self.path))?;
        Ok(())
    }

    /// Delete the file if it exists
    pub fn delete(&self) -> Result<()> {
        if self.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to delete state file: {:?}", self.path))?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
