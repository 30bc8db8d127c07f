//! OS-backed filesystem implementation on top of `tokio::fs`.

use super::{EntryKind, Filesystem};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};

/// Production filesystem backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

fn classify(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_file() {
        EntryKind::File
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_symlink() {
        EntryKind::Symlink
    } else {
        EntryKind::Other
    }
}

#[async_trait]
impl Filesystem for OsFilesystem {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(classify(fs::metadata(path).await?.file_type()))
    }

    async fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        Ok(classify(fs::symlink_metadata(path).await?.file_type()))
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write_file(&self, path: &Path, data: &str) -> io::Result<()> {
        fs::write(path, data).await
    }

    async fn write_file_from(
        &self,
        path: &Path,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> io::Result<()> {
        let mut file = fs::File::create(path).await?;
        tokio::io::copy(reader, &mut file).await?;
        file.flush().await
    }

    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path).await
    }

    async fn read_link(&self, path: &Path) -> io::Result<String> {
        Ok(fs::read_link(path).await?.to_string_lossy().into_owned())
    }

    async fn symlink(&self, target: &str, path: &Path) -> io::Result<()> {
        symlink_impl(target, path).await
    }
}

#[cfg(unix)]
async fn symlink_impl(target: &str, path: &Path) -> io::Result<()> {
    fs::symlink(target, path).await
}

#[cfg(not(unix))]
async fn symlink_impl(_target: &str, _path: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links require a unix target",
    ))
}
