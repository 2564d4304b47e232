//! Run manifest storage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::RunManifest;
use crate::{ResultsError, ResultsResult};

pub const MANIFEST_NAME: &str = "manifest.json";

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_NAME)
}

pub fn save_manifest(dir: &Path, manifest: &RunManifest) -> ResultsResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = manifest_path(dir);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&path, json).map_err(|source| ResultsError::FileWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn load_manifest(dir: &Path) -> ResultsResult<RunManifest> {
    let path = manifest_path(dir);
    if !path.exists() {
        return Err(ResultsError::ManifestNotFound { path });
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
