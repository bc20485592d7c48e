//! `std::fs` storage rooted at a host directory.
//!
//! The engine's absolute paths (`/images/0000000001.jpg`) are resolved
//! relative to the mount root. A failed mount behaves like a missing SD
//! card: every operation reports `NotFound`, which lets the boot code
//! drive the same storage-error dialog as the hardware build.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pocketcam_gui::config::NAME_MAX;
use pocketcam_gui::storage::DirEntry;
use pocketcam_gui::{Storage, StorageError};

pub struct DirStorage {
    root: Option<PathBuf>,
}

fn io_error(e: &std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound { StorageError::NotFound } else { StorageError::Io }
}

impl DirStorage {
    /// Mount `root`, creating it if needed. A mount failure is remembered
    /// rather than returned so the caller can still build the GUI and
    /// show the error dialog.
    pub fn mount(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        match fs::create_dir_all(&root) {
            Ok(()) => Self { root: Some(root) },
            Err(e) => {
                eprintln!("storage: mounting {} failed: {e}", root.display());
                Self { root: None }
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.root.is_some()
    }

    /// Host path for an engine path.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        Some(root.join(path.trim_start_matches('/')))
    }

    fn require(&self, path: &str) -> Result<PathBuf, StorageError> {
        self.resolve(path).ok_or(StorageError::NotFound)
    }
}

fn to_entry(path: &Path, is_dir: bool) -> DirEntry {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let mut bounded = heapless::String::new();
    for c in name.chars().take(NAME_MAX) {
        if bounded.push(c).is_err() {
            break;
        }
    }
    let is_hidden = name.starts_with('.');
    DirEntry { name: bounded, is_dir, is_hidden }
}

impl Storage for DirStorage {
    fn read_dir(
        &mut self,
        dir: &str,
        visit: &mut dyn FnMut(&DirEntry),
    ) -> Result<(), StorageError> {
        let host = self.require(dir)?;
        let reader = fs::read_dir(&host).map_err(|e| io_error(&e))?;

        // Host filesystems enumerate in arbitrary order; sort by name so
        // the listing is stable between visits.
        let mut entries: Vec<(PathBuf, bool)> = Vec::new();
        for item in reader {
            let item = item.map_err(|_| StorageError::Iteration)?;
            let is_dir = item.file_type().map_err(|_| StorageError::Iteration)?.is_dir();
            entries.push((item.path(), is_dir));
        }
        entries.sort();

        for (path, is_dir) in &entries {
            let entry = to_entry(path, *is_dir);
            visit(&entry);
        }
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<(), StorageError> {
        let host = self.require(path)?;
        fs::remove_file(host).map_err(|e| io_error(&e))
    }

    fn mkdir(&mut self, path: &str) -> Result<(), StorageError> {
        let host = self.require(path)?;
        fs::create_dir_all(host).map_err(|e| io_error(&e))
    }

    fn exists(&mut self, path: &str) -> bool {
        self.resolve(path).is_some_and(|p| p.exists())
    }
}
