//! JSON persistence for workspace snapshots.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::CostingError, workspace::Workspace};

use super::{Result, StorageBackend};

const DEFAULT_DIR_NAME: &str = ".costing_core";
const WORKSPACE_DIR: &str = "workspaces";
const TMP_SUFFIX: &str = "tmp";

/// Returns the application data directory, defaulting to `~/.costing_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("COSTING_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

#[derive(Clone)]
pub struct JsonStorage {
    workspaces_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        let workspaces_dir = root.join(WORKSPACE_DIR);
        fs::create_dir_all(&workspaces_dir)?;
        Ok(Self { workspaces_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn workspace_path(&self, name: &str) -> PathBuf {
        self.workspaces_dir
            .join(format!("{}.json", canonical_name(name)))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, workspace: &Workspace, name: &str) -> Result<PathBuf> {
        let path = self.workspace_path(name);
        save_workspace_to_path(workspace, &path)?;
        tracing::debug!(name, path = %path.display(), "saved workspace snapshot");
        Ok(path)
    }

    fn load(&self, name: &str) -> Result<Workspace> {
        let path = self.workspace_path(name);
        if !path.exists() {
            return Err(CostingError::InvalidRef(format!(
                "workspace `{}` not found",
                name
            )));
        }
        load_workspace_from_path(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.workspaces_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.workspace_path(name);
        if !path.exists() {
            return Err(CostingError::InvalidRef(format!(
                "workspace `{}` not found",
                name
            )));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

/// Serializes a workspace to a path, writing atomically via a temp file.
pub fn save_workspace_to_path(workspace: &Workspace, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(workspace)?;
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a workspace, rejecting snapshots from a newer schema.
pub fn load_workspace_from_path(path: &Path) -> Result<Workspace> {
    let data = fs::read_to_string(path)?;
    let workspace: Workspace = serde_json::from_str(&data)?;
    if workspace.schema_version > Workspace::current_schema_version() {
        return Err(CostingError::Persistence(format!(
            "workspace schema v{} is newer than supported v{}",
            workspace.schema_version,
            Workspace::current_schema_version()
        )));
    }
    Ok(workspace)
}

/// Lowercases a workspace name and maps separators to underscores so the
/// file name stays portable.
fn canonical_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            canonical.push(ch.to_ascii_lowercase());
        } else if matches!(ch, ' ' | '-' | '_' | '.') {
            canonical.push('_');
        }
    }
    if canonical.is_empty() {
        canonical.push_str("workspace");
    }
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn canonical_names_are_portable() {
        assert_eq!(canonical_name("My Bakery 2025"), "my_bakery_2025");
        assert_eq!(canonical_name("  "), "workspace");
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let workspace = Workspace::new("Demo");
        let path = storage.save(&workspace, "demo").unwrap();
        assert!(path.exists());

        let loaded = storage.load("demo").unwrap();
        assert_eq!(loaded.id, workspace.id);
        assert_eq!(storage.list().unwrap(), vec!["demo".to_string()]);
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut workspace = Workspace::new("Future");
        workspace.schema_version = Workspace::current_schema_version() + 5;
        storage.save(&workspace, "future").unwrap();

        let err = storage.load("future").expect_err("newer schema must fail");
        match err {
            CostingError::Persistence(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}")
            }
            other => panic!("expected persistence error, got {other:?}"),
        }
    }

    #[test]
    fn missing_workspace_is_an_invalid_reference() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let err = storage.load("absent").expect_err("missing must fail");
        assert!(matches!(err, CostingError::InvalidRef(_)));
    }
}
