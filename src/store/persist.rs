//! Backing document I/O: load/save of the JSON file plus import/export.
//!
//! Save is whole-file replace: the document is serialized to a sibling
//! temp file and renamed over the target, so a crash mid-write never
//! leaves a truncated document behind.

use std::fs;
use std::path::Path;

use crate::error::{RelmapError, Result};
use crate::store::Document;

/// Load the backing document. A missing file yields the default empty
/// document (project "Untitled"), not an error.
pub fn load(path: &Path) -> Result<Document> {
    if !path.exists() {
        log::info!(
            "Backing document {} not found, starting empty",
            path.display()
        );
        return Ok(Document::default());
    }

    let raw = fs::read_to_string(path)?;
    let doc: Document = serde_json::from_str(&raw)?;
    log::debug!(
        "Loaded {} nodes / {} edges from {}",
        doc.nodes.len(),
        doc.edges.len(),
        path.display()
    );
    Ok(doc)
}

/// Persist the document, replacing the whole file atomically. Parent
/// directories are created as needed. Non-ASCII text is written as-is
/// (serde_json never escapes it).
pub fn save(path: &Path, doc: &Document) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(doc)?;

    // Temp file must live in the same directory as the target: rename is
    // only atomic within one filesystem.
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);
    fs::write(&tmp, json.as_bytes())?;
    fs::rename(&tmp, path)?;

    log::debug!(
        "Saved {} nodes / {} edges to {}",
        doc.nodes.len(),
        doc.edges.len(),
        path.display()
    );
    Ok(())
}

/// Parse an externally supplied document. The top-level `nodes` and `edges`
/// keys must be present before typed decoding is attempted; any shape
/// violation is a validation error with a user-facing message, never a
/// panic. An accepted document replaces the prior store wholesale.
pub fn import(raw: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| RelmapError::Validation(format!("Import is not valid JSON: {}", e)))?;

    let obj = value
        .as_object()
        .ok_or_else(|| RelmapError::Validation("Import must be a JSON object".to_string()))?;
    for key in ["nodes", "edges"] {
        if !obj.contains_key(key) {
            return Err(RelmapError::Validation(format!(
                "Import is missing required key: {}",
                key
            )));
        }
    }

    serde_json::from_value(value)
        .map_err(|e| RelmapError::Validation(format!("Import has invalid shape: {}", e)))
}

/// Serialize the current in-memory document verbatim, independent of
/// whether it has been persisted yet.
pub fn export(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}
