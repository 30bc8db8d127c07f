//! Tree / JSON-file bridge.

use crate::error::Error;
use crate::fsys::Filesystem;
use crate::tree::node::Node;
use std::path::Path;
use tracing::debug;

/// Persists trees as JSON documents and loads them back.
pub struct JsonBridge<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> JsonBridge<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Serialize `node` as compact JSON text at `path`.
    pub async fn store(&self, path: &Path, node: &Node) -> Result<(), Error> {
        debug!(path = %path.display(), "storing tree as json");
        let json = serde_json::to_string(node).map_err(|e| Error::json(path, e))?;
        self.fs
            .write_file(path, &json)
            .await
            .map_err(|e| Error::io(path, e))
    }

    /// Read the JSON document at `path` and decode it into a tree.
    pub async fn load(&self, path: &Path) -> Result<Node, Error> {
        debug!(path = %path.display(), "loading tree from json");
        let text = self
            .fs
            .read_file(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| Error::json(path, e))
    }
}
