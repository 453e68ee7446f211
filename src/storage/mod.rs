pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::CostingError, workspace::Workspace};

pub type Result<T> = std::result::Result<T, CostingError>;

/// Abstraction over persistence backends capable of storing workspace
/// snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, workspace: &Workspace, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<Workspace>;
    fn list(&self) -> Result<Vec<String>>;
    fn delete(&self, name: &str) -> Result<()>;

    /// Ad-hoc file operations. Default implementations forward to the
    /// JSON codec.
    fn save_to_path(&self, workspace: &Workspace, path: &Path) -> Result<()> {
        json_backend::save_workspace_to_path(workspace, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Workspace> {
        json_backend::load_workspace_from_path(path)
    }
}

pub use json_backend::JsonStorage;
