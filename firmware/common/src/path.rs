//! Bounded owned path type.
//!
//! Replaces the fixed stack buffers and `strncat` chains of the original
//! firmware with a value type whose join/parent operations are explicit
//! and length-checked: overflow is an error at the boundary, never a
//! silent truncation.

use heapless::String;

use crate::config::PATH_MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PathError {
    /// The joined path would exceed [`PATH_MAX`].
    TooLong,
    /// Paths must be absolute (start with `/`) and non-empty.
    NotAbsolute,
}

/// An owned absolute path with a fixed capacity.
///
/// Invariants: always starts with `/`; never ends with `/` except for the
/// root itself.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PathBuf {
    inner: String<PATH_MAX>,
}

impl PathBuf {
    /// The filesystem root, `/`.
    pub fn root() -> Self {
        let mut inner = String::new();
        inner.push('/').ok();
        Self { inner }
    }

    /// Parse an absolute path, normalizing away a trailing slash.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if !s.starts_with('/') {
            return Err(PathError::NotAbsolute);
        }
        let trimmed = if s.len() > 1 { s.trim_end_matches('/') } else { s };
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        let mut inner = String::new();
        inner.push_str(trimmed).map_err(|_| PathError::TooLong)?;
        Ok(Self { inner })
    }

    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub fn is_root(&self) -> bool {
        self.inner.as_str() == "/"
    }

    /// Append one component with a single separating slash. A trailing
    /// slash on `name` (directory marker) is dropped. A failed join leaves
    /// the path unchanged.
    pub fn join(&mut self, name: &str) -> Result<(), PathError> {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Ok(());
        }
        let rollback = self.inner.len();
        if !self.is_root() && self.inner.push('/').is_err() {
            return Err(PathError::TooLong);
        }
        if self.inner.push_str(name).is_err() {
            self.inner.truncate(rollback);
            return Err(PathError::TooLong);
        }
        Ok(())
    }

    /// Truncate to the parent directory. The root is its own parent.
    pub fn pop_to_parent(&mut self) {
        if self.is_root() {
            return;
        }
        if let Some(idx) = self.inner.rfind('/') {
            let keep = if idx == 0 { 1 } else { idx };
            self.inner.truncate(keep);
        }
    }
}

impl core::fmt::Display for PathBuf {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_trailing_slash() {
        assert_eq!(PathBuf::parse("/images/").unwrap().as_str(), "/images");
        assert_eq!(PathBuf::parse("/").unwrap().as_str(), "/");
        assert_eq!(PathBuf::parse("images"), Err(PathError::NotAbsolute));
    }

    #[test]
    fn join_single_separator() {
        let mut p = PathBuf::parse("/images").unwrap();
        p.join("vacation/").unwrap();
        assert_eq!(p.as_str(), "/images/vacation");
        p.join("0000000001.jpg").unwrap();
        assert_eq!(p.as_str(), "/images/vacation/0000000001.jpg");
    }

    #[test]
    fn join_from_root() {
        let mut p = PathBuf::root();
        p.join("images").unwrap();
        assert_eq!(p.as_str(), "/images");
    }

    #[test]
    fn parent_walks_up() {
        let mut p = PathBuf::parse("/images/vacation").unwrap();
        p.pop_to_parent();
        assert_eq!(p.as_str(), "/images");
        p.pop_to_parent();
        assert_eq!(p.as_str(), "/");
    }

    #[test]
    fn root_guard() {
        let mut p = PathBuf::root();
        p.pop_to_parent();
        assert_eq!(p.as_str(), "/");
        assert!(p.is_root());
    }

    #[test]
    fn overflow_is_an_error_and_leaves_path_usable() {
        let mut p = PathBuf::parse("/a").unwrap();
        let long = [b'x'; PATH_MAX];
        let long = core::str::from_utf8(&long).unwrap();
        assert_eq!(p.join(long), Err(PathError::TooLong));
        assert_eq!(p.as_str(), "/a");
    }
}
