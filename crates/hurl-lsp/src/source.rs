//! Reading Hurl documents from disk.

use std::path::{Path, PathBuf};

use tower_lsp::lsp_types::Url;

/// Map a document URI (or a plain path) to a filesystem path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    if let Some(path) = Url::parse(uri)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
    {
        return path;
    }

    PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri))
}

/// Read a document and split it into lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|error| SourceError {
        path: path.to_path_buf(),
        error,
    })?;

    Ok(hurl_parse::split_lines(&text)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// A document that could not be read.
#[derive(Debug)]
pub struct SourceError {
    pub path: PathBuf,
    pub error: std::io::Error,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "couldn't open file {}: {}", self.path.display(), self.error)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
