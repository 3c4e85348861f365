//! Documentation set bootstrap.
//!
//! Downloads the configured documentation archive and extracts every
//! markdown file into [`Document`] values for indexing. Extraction runs in
//! `spawn_blocking` to keep non-`Send` zip readers off the async runtime.

use std::io::{Cursor, Read};
use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::error::{Result, ToolserveError};

use super::Document;

/// Download the archive at `archive_url` and return its markdown documents.
pub async fn download_documents(
    client: &Client,
    archive_url: &str,
    timeout_secs: u64,
) -> Result<Vec<Document>> {
    info!(url = archive_url, "downloading documentation archive");

    let response = client
        .get(archive_url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await?
        .error_for_status()?;

    let bytes = response.bytes().await?;

    let documents = tokio::task::spawn_blocking(move || extract_markdown(&bytes))
        .await
        .map_err(|e| ToolserveError::Index(format!("archive extraction task failed: {e}")))??;

    info!(count = documents.len(), "documentation documents extracted");
    Ok(documents)
}

/// Walk a zip archive in memory and collect `.md`/`.mdx` entries.
///
/// The top-level directory component is stripped (release archives wrap
/// everything in `<project>-<ref>/`), directories and empty names are
/// skipped, and contents are decoded as UTF-8 lossily.
pub fn extract_markdown(bytes: &[u8]) -> Result<Vec<Document>> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ToolserveError::Index(format!("unreadable documentation archive: {e}")))?;

    let mut documents = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ToolserveError::Index(format!("bad archive entry: {e}")))?;

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !(name.ends_with(".md") || name.ends_with(".mdx")) {
            continue;
        }

        let filename = match name.split_once('/') {
            Some((_, rest)) => rest.to_string(),
            None => name,
        };
        if filename.is_empty() {
            continue;
        }

        let mut raw = Vec::new();
        entry.read_to_end(&mut raw)?;

        documents.push(Document {
            filename,
            content: String::from_utf8_lossy(&raw).into_owned(),
        });
    }

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn archive_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_extracts_markdown_and_strips_top_level_dir() {
        let bytes = archive_with(&[
            ("proj-main/docs/intro.md", "# Intro\nhello"),
            ("proj-main/docs/guide.mdx", "guide body"),
        ]);
        let docs = extract_markdown(&bytes).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].filename, "docs/intro.md");
        assert_eq!(docs[0].content, "# Intro\nhello");
        assert_eq!(docs[1].filename, "docs/guide.mdx");
    }

    #[test]
    fn test_skips_non_markdown_and_directories() {
        let bytes = archive_with(&[
            ("proj-main/docs/", ""),
            ("proj-main/README.md", "readme"),
            ("proj-main/src/lib.rs", "fn main() {}"),
            ("proj-main/logo.png", "not really a png"),
        ]);
        let docs = extract_markdown(&bytes).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "README.md");
    }

    #[test]
    fn test_entry_without_directory_keeps_name() {
        let bytes = archive_with(&[("TOPLEVEL.md", "flat file")]);
        let docs = extract_markdown(&bytes).unwrap();
        assert_eq!(docs[0].filename, "TOPLEVEL.md");
    }

    #[test]
    fn test_garbage_bytes_are_an_index_error() {
        let err = extract_markdown(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ToolserveError::Index(_)));
        assert!(err.to_string().contains("unreadable"));
    }

    #[test]
    fn test_non_utf8_content_is_decoded_lossily() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("p/bad.md", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&[0x68, 0x69, 0xFF, 0xFE]).unwrap();
        writer.finish().unwrap();
        let docs = extract_markdown(&cursor.into_inner()).unwrap();
        assert!(docs[0].content.starts_with("hi"));
    }
}
