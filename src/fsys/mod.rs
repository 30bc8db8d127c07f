//! Filesystem capability surface consumed by the tree engine.
//!
//! Every primitive is single-shot and independently failable. The engine
//! never touches `std::fs`/`tokio::fs` directly; it goes through this trait
//! so alternative backings can be injected.

pub mod os;

pub use os::OsFilesystem;

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::io::AsyncRead;

/// Classification of a filesystem entry, as reported by stat/lstat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    /// Anything else: device, socket, fifo, ...
    Other,
}

/// Async filesystem primitives.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Classify the entry at `path`, following symbolic links.
    async fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Classify the entry at `path` without following symbolic links.
    async fn lstat(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the entry names of a directory.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Read a whole file as UTF-8 text.
    async fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Write a whole file in a single shot.
    async fn write_file(&self, path: &Path, data: &str) -> io::Result<()>;

    /// Create a new file at `path` and copy `reader` into it until EOF.
    async fn write_file_from(
        &self,
        path: &Path,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> io::Result<()>;

    /// Create a single directory; the parent must already exist.
    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Read the raw target of a symbolic link, unresolved.
    async fn read_link(&self, path: &Path) -> io::Result<String>;

    /// Create a symbolic link at `path` pointing at `target`, verbatim.
    async fn symlink(&self, target: &str, path: &Path) -> io::Result<()>;
}
