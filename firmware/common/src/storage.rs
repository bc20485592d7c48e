//! Filesystem collaborator and directory enumeration helpers.
//!
//! The SD driver sits behind [`Storage`]; the engine only needs ordered
//! directory enumeration, delete, mkdir and existence checks. On top of
//! the trait live the two helpers the file explorer is built from:
//! a filtered file count and name-by-index lookup. Hidden entries and
//! entries with empty names are invisible to both.

use heapless::String;

use crate::config::NAME_MAX;

/// One entry yielded during directory enumeration.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DirEntry {
    pub name: String<NAME_MAX>,
    pub is_dir: bool,
    pub is_hidden: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StorageError {
    /// Path does not exist or could not be opened.
    NotFound,
    /// Read/write/delete failed mid-operation.
    Io,
    /// The directory iterator ended in an error state; listing results
    /// are not trustworthy.
    Iteration,
}

/// Hierarchical filesystem collaborator.
pub trait Storage {
    /// Enumerate `dir` in on-disk order, invoking `visit` for every entry
    /// (including hidden ones; filtering is the caller's business).
    fn read_dir(
        &mut self,
        dir: &str,
        visit: &mut dyn FnMut(&DirEntry),
    ) -> Result<(), StorageError>;

    /// Delete a file.
    fn remove(&mut self, path: &str) -> Result<(), StorageError>;

    /// Create a directory (and missing parents).
    fn mkdir(&mut self, path: &str) -> Result<(), StorageError>;

    /// Whether a file or directory exists.
    fn exists(&mut self, path: &str) -> bool;
}

fn visible(entry: &DirEntry) -> bool {
    !entry.is_hidden && !entry.name.is_empty()
}

/// Count of visible entries in `dir`.
pub fn file_count<S: Storage + ?Sized>(storage: &mut S, dir: &str) -> Result<u32, StorageError> {
    let mut count = 0u32;
    storage.read_dir(dir, &mut |entry| {
        if visible(entry) {
            count += 1;
        }
    })?;
    Ok(count)
}

/// Name of the `index`th visible entry in `dir`, directories suffixed
/// with `/`. `Ok(None)` when the index is past the end.
pub fn name_from_index<S: Storage + ?Sized>(
    storage: &mut S,
    dir: &str,
    index: u32,
) -> Result<Option<String<{ NAME_MAX + 2 }>>, StorageError> {
    let mut seen = 0u32;
    let mut found: Option<String<{ NAME_MAX + 2 }>> = None;
    storage.read_dir(dir, &mut |entry| {
        if !visible(entry) {
            return;
        }
        if seen == index && found.is_none() {
            let mut name: String<{ NAME_MAX + 2 }> = String::new();
            name.push_str(entry.name.as_str()).ok();
            if entry.is_dir {
                name.push('/').ok();
            }
            found = Some(name);
        }
        seen += 1;
    })?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemStorage;

    #[test]
    fn count_filters_hidden() {
        let mut fs = MemStorage::new();
        fs.add_dir("/images");
        fs.add_file("/images/0000000001.jpg");
        fs.add_file("/images/.thumbs");
        fs.add_file("/images/0000000002.jpg");
        assert_eq!(file_count(&mut fs, "/images"), Ok(2));
    }

    #[test]
    fn name_lookup_skips_hidden_and_marks_dirs() {
        let mut fs = MemStorage::new();
        fs.add_dir("/images");
        fs.add_file("/images/.hidden");
        fs.add_dir("/images/raw");
        fs.add_file("/images/0000000001.jpg");
        let first = name_from_index(&mut fs, "/images", 0).unwrap().unwrap();
        assert_eq!(first.as_str(), "raw/");
        let second = name_from_index(&mut fs, "/images", 1).unwrap().unwrap();
        assert_eq!(second.as_str(), "0000000001.jpg");
        assert_eq!(name_from_index(&mut fs, "/images", 2), Ok(None));
    }

    #[test]
    fn missing_directory_errors() {
        let mut fs = MemStorage::new();
        assert_eq!(file_count(&mut fs, "/nope"), Err(StorageError::NotFound));
    }
}
