//! Filesystem node types and their JSON wire representation.
//!
//! A node is a tagged union: each kind carries exactly the fields it needs,
//! so illegal combinations (a folder with file data, an alias without a
//! target) are unrepresentable in memory. The wire format is pinned to the
//! historical integer codes and field names and must not be renumbered.

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tokio::io::AsyncRead;

/// Wire code for entries that are none of file/directory/symlink.
pub const TYPE_UNKNOWN: i64 = -1;
/// Wire code for regular files.
pub const TYPE_FILE: i64 = 1;
/// Wire code for directories.
pub const TYPE_FOLDER: i64 = 2;
/// Wire code for symbolic links.
pub const TYPE_ALIAS: i64 = 3;

/// Content of a file node.
///
/// Inline text is what reads produce and what the JSON bridge understands.
/// A streamed source can only be written to disk; it is consumed by the
/// write and cannot be serialized.
pub enum FileData {
    Text(String),
    Stream(Box<dyn AsyncRead + Send + Unpin>),
}

impl Default for FileData {
    fn default() -> Self {
        FileData::Text(String::new())
    }
}

impl fmt::Debug for FileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileData::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FileData::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl PartialEq for FileData {
    /// Streamed content has no observable value, so it never compares equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FileData::Text(a), FileData::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for FileData {
    fn from(text: &str) -> Self {
        FileData::Text(text.to_string())
    }
}

impl From<String> for FileData {
    fn from(text: String) -> Self {
        FileData::Text(text)
    }
}

/// One filesystem entry plus its subtree.
#[derive(Debug, PartialEq)]
pub enum Node {
    File { name: String, data: FileData },
    Folder { name: String, children: Vec<Node> },
    Alias { name: String, target: String },
    Unknown { name: String },
}

impl Node {
    pub fn file(name: impl Into<String>, data: impl Into<FileData>) -> Self {
        Node::File {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn alias(name: impl Into<String>, target: impl Into<String>) -> Self {
        Node::Alias {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        Node::Unknown { name: name.into() }
    }

    /// Base name of the entry this node describes.
    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. }
            | Node::Folder { name, .. }
            | Node::Alias { name, .. }
            | Node::Unknown { name } => name,
        }
    }

    /// Wire code of this node's kind.
    pub fn type_code(&self) -> i64 {
        match self {
            Node::File { .. } => TYPE_FILE,
            Node::Folder { .. } => TYPE_FOLDER,
            Node::Alias { .. } => TYPE_ALIAS,
            Node::Unknown { .. } => TYPE_UNKNOWN,
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::File { name, data } => {
                let text = match data {
                    FileData::Text(text) => text,
                    FileData::Stream(_) => {
                        return Err(S::Error::custom(
                            "streamed file content is not JSON-representable",
                        ))
                    }
                };
                let mut state = serializer.serialize_struct("Node", 3)?;
                state.serialize_field("name", name)?;
                state.serialize_field("type", &TYPE_FILE)?;
                state.serialize_field("data", text)?;
                state.end()
            }
            Node::Folder { name, children } => {
                let mut state = serializer.serialize_struct("Node", 3)?;
                state.serialize_field("name", name)?;
                state.serialize_field("type", &TYPE_FOLDER)?;
                state.serialize_field("children", children)?;
                state.end()
            }
            Node::Alias { name, target } => {
                let mut state = serializer.serialize_struct("Node", 3)?;
                state.serialize_field("name", name)?;
                state.serialize_field("type", &TYPE_ALIAS)?;
                state.serialize_field("orig", target)?;
                state.end()
            }
            Node::Unknown { name } => {
                let mut state = serializer.serialize_struct("Node", 2)?;
                state.serialize_field("name", name)?;
                state.serialize_field("type", &TYPE_UNKNOWN)?;
                state.end()
            }
        }
    }
}

/// Raw document shape: a single struct with conditionally-present fields,
/// validated into the tagged union after parsing.
#[derive(Deserialize)]
struct RawNode {
    name: String,
    #[serde(rename = "type")]
    kind: i64,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
    #[serde(default)]
    orig: Option<String>,
}

impl RawNode {
    fn into_node(self) -> Result<Node, String> {
        match self.kind {
            TYPE_FILE => Ok(Node::File {
                name: self.name,
                // absent data is normalized to empty content
                data: FileData::Text(self.data.unwrap_or_default()),
            }),
            TYPE_FOLDER => {
                let children = self
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(RawNode::into_node)
                    .collect::<Result<_, _>>()?;
                Ok(Node::Folder {
                    name: self.name,
                    children,
                })
            }
            TYPE_ALIAS => match self.orig {
                Some(target) => Ok(Node::Alias {
                    name: self.name,
                    target,
                }),
                None => Err(format!("alias entry {:?} has no link target", self.name)),
            },
            // unrecognized codes degrade to Unknown, mirroring the writer's
            // ignore-unknown rule
            _ => Ok(Node::Unknown { name: self.name }),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawNode::deserialize(deserializer)?
            .into_node()
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn wire_codes_are_pinned() {
        assert_eq!(TYPE_UNKNOWN, -1);
        assert_eq!(TYPE_FILE, 1);
        assert_eq!(TYPE_FOLDER, 2);
        assert_eq!(TYPE_ALIAS, 3);
    }

    #[test]
    fn each_kind_serializes_with_its_mandated_fields() {
        let tree = Node::folder(
            "root",
            vec![
                Node::file("file", "content"),
                Node::alias("alias", "dir"),
                Node::unknown("socket"),
            ],
        );
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "root",
                "type": 2,
                "children": [
                    { "name": "file", "type": 1, "data": "content" },
                    { "name": "alias", "type": 3, "orig": "dir" },
                    { "name": "socket", "type": -1 },
                ],
            })
        );
    }

    #[test]
    fn round_trips_through_the_wire_format() {
        let json = serde_json::to_string(&Node::folder(
            "root",
            vec![Node::file("f", "x"), Node::alias("a", "../f")],
        ))
        .unwrap();
        let decoded: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(
            decoded,
            Node::folder("root", vec![Node::file("f", "x"), Node::alias("a", "../f")])
        );
    }

    #[test]
    fn missing_file_data_decodes_as_empty_content() {
        let node: Node = serde_json::from_value(json!({ "name": "f", "type": 1 })).unwrap();
        assert_eq!(node, Node::file("f", ""));
    }

    #[test]
    fn missing_folder_children_decode_as_an_empty_folder() {
        let node: Node = serde_json::from_value(json!({ "name": "d", "type": 2 })).unwrap();
        assert_eq!(node, Node::folder("d", Vec::new()));
    }

    #[test]
    fn alias_without_a_target_is_rejected() {
        let err = serde_json::from_value::<Node>(json!({ "name": "a", "type": 3 })).unwrap_err();
        assert!(err.to_string().contains("link target"));
    }

    #[test]
    fn unrecognized_type_codes_decode_as_unknown() {
        let node: Node = serde_json::from_value(json!({ "name": "x", "type": 42 })).unwrap();
        assert_eq!(node, Node::unknown("x"));
    }

    #[test]
    fn streamed_content_never_compares_equal() {
        let a = Node::file("s", FileData::Stream(Box::new(Cursor::new(Vec::new()))));
        let b = Node::file("s", FileData::Stream(Box::new(Cursor::new(Vec::new()))));
        assert_ne!(a, b);
    }

    #[test]
    fn streamed_content_does_not_serialize() {
        let node = Node::file("s", FileData::Stream(Box::new(Cursor::new(Vec::new()))));
        assert!(serde_json::to_string(&node).is_err());
    }
}
