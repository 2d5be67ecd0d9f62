//! Destinations for rendered files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::generator::RenderedFile;

/// Receives rendered files in generation order
pub trait OutputWriter {
    /// Persist `file`, returning where it went
    fn write(&mut self, file: &RenderedFile) -> io::Result<PathBuf>;
}

/// Writes files below a root directory, overwriting existing ones
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputWriter for FsWriter {
    fn write(&mut self, file: &RenderedFile) -> io::Result<PathBuf> {
        let target = self.root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &file.contents)?;
        debug!("Wrote {}", target.display());
        Ok(target)
    }
}

/// Records what would be written without touching the filesystem
#[derive(Debug, Clone, Default)]
pub struct DryRunWriter {
    root: PathBuf,
    planned: Vec<PathBuf>,
}

impl DryRunWriter {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            planned: Vec::new(),
        }
    }

    /// Paths that would have been written, in order
    pub fn planned(&self) -> &[PathBuf] {
        &self.planned
    }
}

impl OutputWriter for DryRunWriter {
    fn write(&mut self, file: &RenderedFile) -> io::Result<PathBuf> {
        let target = self.root.join(&file.path);
        info!("Dry run: would write {}", target.display());
        self.planned.push(target.clone());
        Ok(target)
    }
}
