#![deny(missing_docs)]

//! # Document Writer
//!
//! Renders a [`Document`] as indented JSON and as YAML, and persists each
//! rendering atomically: the text goes to a temporary file in the destination
//! directory, which then replaces the final path in one rename. A failed write
//! leaves any previous artifact untouched and removes the temporary file.

use crate::document::Document;
use crate::error::{AppError, AppResult, Problems};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Output target formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl Format {
    /// Renders `doc` in this format.
    pub fn render(&self, doc: &Document) -> AppResult<String> {
        match self {
            Format::Json => render_json(doc),
            Format::Yaml => render_yaml(doc),
        }
    }
}

/// Renders the document as 2-space indented JSON with a trailing newline.
pub fn render_json(doc: &Document) -> AppResult<String> {
    let mut out = serde_json::to_string_pretty(doc)
        .map_err(|e| AppError::Serialization(format!("JSON serialization failed: {}", e)))?;
    out.push('\n');
    Ok(out)
}

/// Renders the document as YAML.
pub fn render_yaml(doc: &Document) -> AppResult<String> {
    serde_yaml::to_string(doc)
        .map_err(|e| AppError::Serialization(format!("YAML serialization failed: {}", e)))
}

/// Writes `content` to `path` atomically, creating the parent directory if needed.
pub fn write_atomic(path: &Path, content: &str) -> AppResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        tracing::debug!(dir = %parent.display(), "creating output directory");
        fs::create_dir_all(parent)?;
    }

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| AppError::Io(e.error))?;
    Ok(())
}

/// Per-format outcome of [`write_document`].
#[derive(Debug)]
pub struct WriteReport {
    /// Result of writing the JSON artifact.
    pub json: AppResult<PathBuf>,
    /// Result of writing the YAML artifact.
    pub yaml: AppResult<PathBuf>,
}

impl WriteReport {
    /// Returns true when both artifacts were written.
    pub fn is_success(&self) -> bool {
        self.json.is_ok() && self.yaml.is_ok()
    }

    /// The written paths, or an `Aggregate` error holding every failed target.
    pub fn into_result(self) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut problems = Problems::new();
        for outcome in [self.json, self.yaml] {
            match outcome {
                Ok(path) => written.push(path),
                Err(e) => problems.push(e),
            }
        }
        problems.into_result()?;
        Ok(written)
    }
}

/// Renders and writes one format to `path`.
pub fn write_format(doc: &Document, format: Format, path: &Path) -> AppResult<PathBuf> {
    let content = format.render(doc)?;
    write_atomic(path, &content)?;
    tracing::info!(path = %path.display(), format = ?format, "wrote OpenAPI document");
    Ok(path.to_path_buf())
}

/// Writes the JSON and YAML artifacts independently.
///
/// A failure of one target does not prevent the other from being written.
pub fn write_document(doc: &Document, json_path: &Path, yaml_path: &Path) -> WriteReport {
    WriteReport {
        json: write_format(doc, Format::Json, json_path),
        yaml: write_format(doc, Format::Yaml, yaml_path),
    }
}
