// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local filesystem file source

use super::{offset_of, FileSource, SourceError};
use async_trait::async_trait;
use folio_core::FileHandle;
use std::io::SeekFrom;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

const CHUNK: usize = 64 * 1024;

/// Reads upload bytes straight from disk
#[derive(Clone, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }

    /// Build a file handle from a path on disk
    pub async fn handle(path: &Path) -> Result<FileHandle, SourceError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| SourceError::Io {
                name: name.clone(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(SourceError::NoLocation(name));
        }

        Ok(FileHandle::new(name, metadata.len(), media_type_for(path)).with_path(path))
    }
}

/// Guess a media type from the file extension
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "zip" => "application/zip",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "tif" | "tiff" => "image/tiff",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl FileSource for LocalFileSource {
    async fn read(&self, file: &FileHandle, from: u8, to: u8) -> Result<u64, SourceError> {
        let path = file
            .path
            .as_deref()
            .ok_or_else(|| SourceError::NoLocation(file.name.clone()))?;
        let io_err = |source| SourceError::Io {
            name: file.name.clone(),
            source,
        };

        let start = offset_of(file.size, from);
        let expected = offset_of(file.size, to).saturating_sub(start);

        let mut handle = tokio::fs::File::open(path).await.map_err(io_err)?;
        handle.seek(SeekFrom::Start(start)).await.map_err(io_err)?;

        let mut buf = vec![0u8; CHUNK];
        let mut found = 0u64;
        while found < expected {
            let want = (expected - found).min(CHUNK as u64) as usize;
            let n = handle.read(&mut buf[..want]).await.map_err(io_err)?;
            if n == 0 {
                return Err(SourceError::Truncated {
                    name: file.name.clone(),
                    expected,
                    found,
                });
            }
            found += n as u64;
        }

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn handle_reads_size_and_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Research Paper.pdf");
        std::fs::write(&path, vec![7u8; 2048]).unwrap();

        let handle = LocalFileSource::handle(&path).await.unwrap();
        assert_eq!(handle.name, "Research Paper.pdf");
        assert_eq!(handle.size, 2048);
        assert_eq!(handle.media_type, "application/pdf");
        assert_eq!(handle.path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn handle_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFileSource::handle(&dir.path().join("nope.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[tokio::test]
    async fn read_covers_the_requested_slice() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1u8; 1000]).unwrap();
        let handle = LocalFileSource::handle(file.path()).await.unwrap();

        let source = LocalFileSource::new();
        assert_eq!(source.read(&handle, 0, 25).await.unwrap(), 250);
        assert_eq!(source.read(&handle, 25, 100).await.unwrap(), 750);
    }

    #[tokio::test]
    async fn empty_file_reads_nothing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let handle = LocalFileSource::handle(file.path()).await.unwrap();
        assert_eq!(LocalFileSource::new().read(&handle, 0, 100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn shrunk_file_is_truncated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1u8; 100]).unwrap();
        let handle = LocalFileSource::handle(file.path()).await.unwrap();
        file.as_file().set_len(10).unwrap();

        let err = LocalFileSource::new()
            .read(&handle, 0, 50)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Truncated { found: 10, .. }));
    }

    #[tokio::test]
    async fn handle_without_path_has_no_location() {
        let handle = FileHandle::new("pasted.txt", 10, "text/plain");
        let err = LocalFileSource::new()
            .read(&handle, 0, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NoLocation(_)));
    }

    #[test]
    fn unknown_extensions_are_octet_stream() {
        assert_eq!(media_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("archive.tar.xz")), "application/octet-stream");
        assert_eq!(media_type_for(Path::new("README")), "application/octet-stream");
    }
}
