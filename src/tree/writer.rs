//! Recursive tree-to-disk writes.

use crate::error::Error;
use crate::fsys::Filesystem;
use crate::tree::node::{FileData, Node};
use futures::future::{self, BoxFuture, FutureExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Recursive writer materializing a [`Node`] tree under a destination
/// directory.
///
/// The tree is consumed by the write: streamed file content is drained into
/// its destination file. Every folder's children are written concurrently;
/// the first failure fails the enclosing write, though siblings that were
/// already in flight may have left entries on disk.
pub struct TreeWriter<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> TreeWriter<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Write `node` as a new entry under `dest`, which must already exist.
    /// Existing entries are never overwritten or removed.
    pub async fn write(&self, dest: &Path, node: Node) -> Result<(), Error> {
        debug!(dest = %dest.display(), entry = node.name(), "writing tree");
        self.write_entry(dest.to_path_buf(), node).await
    }

    fn write_entry(&self, dest: PathBuf, node: Node) -> BoxFuture<'_, Result<(), Error>> {
        async move {
            match node {
                Node::File { name, data } => {
                    let item_path = dest.join(name);
                    match data {
                        FileData::Text(text) => self.fs.write_file(&item_path, &text).await,
                        FileData::Stream(mut reader) => {
                            self.fs.write_file_from(&item_path, reader.as_mut()).await
                        }
                    }
                    .map_err(|e| Error::io(&item_path, e))
                }
                Node::Folder { name, children } => {
                    let item_path = dest.join(name);
                    self.fs
                        .create_dir(&item_path)
                        .await
                        .map_err(|e| Error::io(&item_path, e))?;
                    future::try_join_all(
                        children
                            .into_iter()
                            .map(|child| self.write_entry(item_path.clone(), child)),
                    )
                    .await?;
                    Ok(())
                }
                Node::Alias { name, target } => {
                    let item_path = dest.join(name);
                    self.fs
                        .symlink(&target, &item_path)
                        .await
                        .map_err(|e| Error::io(&item_path, e))
                }
                Node::Unknown { name } => {
                    debug!(entry = %name, "ignoring entry of unknown kind");
                    Ok(())
                }
            }
        }
        .boxed()
    }
}
