//! Run configuration shared by the composer and the front-end

pub mod package_manager;

use crate::error::ScaffoldResult;
use crate::templates::TemplateStore;
use std::path::{Path, PathBuf};

pub use package_manager::{DependencyKind, PackageManager, PACKAGE_MANAGER_ENV};

/// Environment variable pointing at an alternative template root
pub const TEMPLATE_DIR_ENV: &str = "TYPEDSCRIPT_TEMPLATE_DIR";

/// Explicitly constructed context for one generation run
#[derive(Debug, Clone)]
pub struct GenerateContext {
    /// Directory the project folder is created in
    pub working_dir: PathBuf,
    pub store: TemplateStore,
    pub package_manager: PackageManager,
    /// CLI version used for template compatibility checks
    pub cli_version: String,
}

impl GenerateContext {
    pub fn new(working_dir: impl Into<PathBuf>, store: TemplateStore) -> Self {
        Self {
            working_dir: working_dir.into(),
            store,
            package_manager: PackageManager::default(),
            cli_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Build a context from command-line/environment overrides.
    ///
    /// `template_dir` and `package_manager` are already resolved against
    /// their environment variables by the caller.
    pub fn from_overrides(
        working_dir: &Path,
        template_dir: Option<&Path>,
        package_manager: Option<&str>,
        cli_version: &str,
    ) -> ScaffoldResult<Self> {
        let store = TemplateStore::locate(template_dir)?;
        let package_manager = match package_manager {
            Some(name) => name.parse()?,
            None => PackageManager::detect(),
        };

        Ok(Self {
            working_dir: working_dir.to_path_buf(),
            store,
            package_manager,
            cli_version: cli_version.to_string(),
        })
    }

    /// Where a project with this resolved name will be generated
    pub fn project_dir(&self, resolved_name: &str) -> PathBuf {
        self.working_dir.join(resolved_name)
    }
}
