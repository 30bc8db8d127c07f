//! Recursive disk-to-tree reads.

use crate::error::Error;
use crate::fsys::{EntryKind, Filesystem};
use crate::tree::node::{FileData, Node};
use futures::future::{self, BoxFuture, FutureExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Whether a read follows symbolic links through to their targets or
/// preserves them as alias nodes. This is the only behavioral difference
/// between the two public entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    Follow,
    Preserve,
}

/// Recursive reader producing a [`Node`] tree from a disk path.
///
/// Every directory's entries are read concurrently; the first failure
/// anywhere in the subtree fails the whole read.
pub struct TreeReader<'a> {
    fs: &'a dyn Filesystem,
    mode: LinkMode,
}

impl<'a> TreeReader<'a> {
    pub fn new(fs: &'a dyn Filesystem, mode: LinkMode) -> Self {
        Self { fs, mode }
    }

    /// Read the entry at `path` and everything below it.
    pub async fn read(&self, path: &Path) -> Result<Node, Error> {
        debug!(path = %path.display(), mode = ?self.mode, "reading tree");
        self.read_entry(path.to_path_buf()).await
    }

    fn read_entry(&self, path: PathBuf) -> BoxFuture<'_, Result<Node, Error>> {
        async move {
            let kind = match self.mode {
                LinkMode::Follow => self.fs.stat(&path).await,
                LinkMode::Preserve => self.fs.lstat(&path).await,
            }
            .map_err(|e| Error::io(&path, e))?;

            let name = base_name(&path);
            match kind {
                EntryKind::File => {
                    let text = self
                        .fs
                        .read_file(&path)
                        .await
                        .map_err(|e| Error::io(&path, e))?;
                    Ok(Node::File {
                        name,
                        data: FileData::Text(text),
                    })
                }
                EntryKind::Directory => {
                    let entries = self
                        .fs
                        .read_dir(&path)
                        .await
                        .map_err(|e| Error::io(&path, e))?;
                    let children = future::try_join_all(
                        entries
                            .into_iter()
                            .map(|entry| self.read_entry(path.join(entry))),
                    )
                    .await?;
                    Ok(Node::Folder { name, children })
                }
                EntryKind::Symlink => {
                    let target = self
                        .fs
                        .read_link(&path)
                        .await
                        .map_err(|e| Error::io(&path, e))?;
                    Ok(Node::Alias { name, target })
                }
                EntryKind::Other => Ok(Node::Unknown { name }),
            }
        }
        .boxed()
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
