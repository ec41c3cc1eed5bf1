//! Helpers shared by the one-shot `run` command and the interactive shell.

use std::path::{Path, PathBuf};

use anyhow::Context;
use dv_checks::{CheckSchemaRegistry, FieldPath};
use dv_client::ApiClient;
use dv_core::responses::ReportFile;

/// Fetch the check catalog; an unavailable catalog yields an empty registry.
pub async fn load_registry(client: &ApiClient) -> CheckSchemaRegistry {
    CheckSchemaRegistry::load(client.available_checks()).await
}

/// Read a dataset from disk, returning its file name and contents.
pub fn read_dataset(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("'{}' has no usable file name", path.display()))?
        .to_string();
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok((filename, bytes))
}

/// Write a downloaded report into `dir`, creating it if needed.
pub fn save_report(dir: &Path, file: &ReportFile) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, &file.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Split `key=value` or `group.child=value`.
pub fn parse_assignment(text: &str) -> anyhow::Result<(FieldPath, &str)> {
    let (key, value) = text
        .split_once('=')
        .with_context(|| format!("expected KEY=VALUE, got '{text}'"))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("missing field name in '{text}'");
    }
    Ok((FieldPath::parse(key), value))
}
