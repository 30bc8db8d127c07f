//! Dirio: Directory Tree / JSON Conversion
//!
//! Converts a file-system directory tree into a JSON-serializable in-memory
//! tree and back. Four endpoints are interchangeable: a directory on disk,
//! a JSON file on disk, an in-memory [`Node`] tree, and streamed file
//! content on write.

pub mod bridge;
pub mod convert;
pub mod error;
pub mod fsys;
pub mod tree;

pub use bridge::JsonBridge;
pub use convert::{convert, lconvert, Source};
pub use error::Error;
pub use fsys::{EntryKind, Filesystem, OsFilesystem};
pub use tree::node::{FileData, Node};
pub use tree::reader::{LinkMode, TreeReader};
pub use tree::writer::TreeWriter;
