use super::DataStore;
use crate::error::{Result, TodoError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(TodoError::Io)?;
            }
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn read(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(TodoError::NotFound(self.location()));
        }
        debug!(path = %self.path.display(), "reading data file");
        fs::read_to_string(&self.path).map_err(TodoError::Io)
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.ensure_parent_dir()?;
        debug!(path = %self.path.display(), bytes = contents.len(), "writing data file");
        fs::write(&self.path, contents).map_err(TodoError::Io)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
