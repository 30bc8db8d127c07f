//! Endpoint dispatch and the public conversion entry points.
//!
//! The shapes of the two call arguments select one of six pipelines. The
//! shape is decided exactly once, at the boundary, into a [`Request`]
//! variant; nothing downstream re-inspects argument types.

use crate::bridge::JsonBridge;
use crate::error::Error;
use crate::fsys::{Filesystem, OsFilesystem};
use crate::tree::node::Node;
use crate::tree::reader::{LinkMode, TreeReader};
use crate::tree::writer::TreeWriter;
use std::path::{Path, PathBuf};

/// Conversion source: a filesystem path or an in-memory tree.
///
/// A path ending in `.json` names a JSON document; any other path names a
/// directory entry to read.
#[derive(Debug)]
pub enum Source {
    Path(PathBuf),
    Tree(Node),
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<Node> for Source {
    fn from(tree: Node) -> Self {
        Source::Tree(tree)
    }
}

/// One conversion pipeline, chosen from the shapes of the raw arguments.
#[derive(Debug)]
enum Request {
    LoadJsonToDisk { json: PathBuf, dest: PathBuf },
    LoadJsonToMemory { json: PathBuf },
    ReadDiskToJson { dir: PathBuf, dest: PathBuf },
    ReadDiskToMemory { dir: PathBuf },
    StoreTreeToJson { tree: Node, dest: PathBuf },
    WriteTreeToDisk { tree: Node, dest: PathBuf },
}

impl Request {
    /// Classify raw arguments into a pipeline. The only inspection a path
    /// gets is the `.json` suffix test; destinations are never probed on
    /// disk.
    fn classify(dest: Option<&Path>, source: Source) -> Result<Request, Error> {
        match source {
            Source::Path(source) if is_json_path(&source) => Ok(match dest {
                Some(dest) => Request::LoadJsonToDisk {
                    json: source,
                    dest: dest.to_path_buf(),
                },
                None => Request::LoadJsonToMemory { json: source },
            }),
            Source::Path(source) => Ok(match dest {
                Some(dest) => Request::ReadDiskToJson {
                    dir: source,
                    dest: dest.to_path_buf(),
                },
                None => Request::ReadDiskToMemory { dir: source },
            }),
            Source::Tree(tree) => match dest {
                Some(dest) if is_json_path(dest) => Ok(Request::StoreTreeToJson {
                    tree,
                    dest: dest.to_path_buf(),
                }),
                Some(dest) => Ok(Request::WriteTreeToDisk {
                    tree,
                    dest: dest.to_path_buf(),
                }),
                None => Err(Error::DestinationRequired),
            },
        }
    }
}

/// Suffix-only test for a JSON endpoint. A bare `.json` file name is a
/// dotfile, not an extension, and does not qualify.
fn is_json_path(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

async fn run(
    fs: &dyn Filesystem,
    mode: LinkMode,
    dest: Option<&Path>,
    source: Source,
) -> Result<Option<Node>, Error> {
    match Request::classify(dest, source)? {
        Request::LoadJsonToDisk { json, dest } => {
            let tree = JsonBridge::new(fs).load(&json).await?;
            TreeWriter::new(fs).write(&dest, tree).await?;
            Ok(None)
        }
        Request::LoadJsonToMemory { json } => Ok(Some(JsonBridge::new(fs).load(&json).await?)),
        Request::ReadDiskToJson { dir, dest } => {
            let tree = TreeReader::new(fs, mode).read(&dir).await?;
            JsonBridge::new(fs).store(&dest, &tree).await?;
            Ok(None)
        }
        Request::ReadDiskToMemory { dir } => {
            Ok(Some(TreeReader::new(fs, mode).read(&dir).await?))
        }
        Request::StoreTreeToJson { tree, dest } => {
            JsonBridge::new(fs).store(&dest, &tree).await?;
            Ok(None)
        }
        Request::WriteTreeToDisk { tree, dest } => {
            TreeWriter::new(fs).write(&dest, tree).await?;
            Ok(None)
        }
    }
}

/// Convert between two endpoints, following symbolic links on reads: a
/// disk symlink reads as the file or directory it points to.
///
/// With `dest` absent the result lands in memory and is returned as
/// `Some(tree)`; disk and JSON sinks return `None`. Exactly one outcome is
/// produced per call: the result, or the first error observed.
pub async fn convert<S>(dest: Option<&Path>, source: S) -> Result<Option<Node>, Error>
where
    S: Into<Source>,
{
    run(&OsFilesystem, LinkMode::Follow, dest, source.into()).await
}

/// Same dispatch as [`convert`], but reads preserve symbolic links as
/// alias nodes carrying the raw link target.
pub async fn lconvert<S>(dest: Option<&Path>, source: S) -> Result<Option<Node>, Error>
where
    S: Into<Source>,
{
    run(&OsFilesystem, LinkMode::Preserve, dest, source.into()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        Node::folder("t", Vec::new())
    }

    #[test]
    fn json_suffix_is_an_exact_extension_test() {
        assert!(is_json_path(Path::new("tree.json")));
        assert!(is_json_path(Path::new("/a/b/tree.json")));
        assert!(!is_json_path(Path::new(".json")));
        assert!(!is_json_path(Path::new("tree.jsonx")));
        assert!(!is_json_path(Path::new("tree.json/sub")));
        assert!(!is_json_path(Path::new("outdir")));
    }

    #[test]
    fn path_sources_route_on_their_own_suffix() {
        assert!(matches!(
            Request::classify(Some(Path::new("out")), Source::from("in.json")).unwrap(),
            Request::LoadJsonToDisk { .. }
        ));
        assert!(matches!(
            Request::classify(None, Source::from("in.json")).unwrap(),
            Request::LoadJsonToMemory { .. }
        ));
        assert!(matches!(
            Request::classify(Some(Path::new("out.json")), Source::from("indir")).unwrap(),
            Request::ReadDiskToJson { .. }
        ));
        assert!(matches!(
            Request::classify(None, Source::from("indir")).unwrap(),
            Request::ReadDiskToMemory { .. }
        ));
    }

    #[test]
    fn tree_sources_route_on_the_destination_suffix() {
        assert!(matches!(
            Request::classify(Some(Path::new("out.json")), Source::Tree(tree())).unwrap(),
            Request::StoreTreeToJson { .. }
        ));
        assert!(matches!(
            Request::classify(Some(Path::new("outdir")), Source::Tree(tree())).unwrap(),
            Request::WriteTreeToDisk { .. }
        ));
    }

    #[test]
    fn tree_source_without_destination_is_a_usage_error() {
        assert!(matches!(
            Request::classify(None, Source::Tree(tree())),
            Err(Error::DestinationRequired)
        ));
    }
}
