//! Error types for scaffolding runs

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the core library
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// Everything that can stop a generation run.
///
/// Only [`ScaffoldError::Declined`] is a clean exit; every other variant maps to
/// a non-zero exit status.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    // Configuration errors
    #[error("Invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Unknown project type '{0}' (expected one of: base, service, package, empty, monorepo)")]
    UnknownProjectType(String),

    #[error("Unknown framework '{0}' (expected express or fastify)")]
    UnknownFramework(String),

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("Unknown package manager '{0}' (expected npm, pnpm, yarn or bun)")]
    UnknownPackageManager(String),

    #[error("Feature '{feature}' is not available for the {template} template")]
    UnsupportedFeature { feature: String, template: String },

    // Filesystem errors
    #[error("Template directory not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove existing directory {path}: {source}")]
    Removal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Template contract errors
    #[error("Placeholder {marker} not found in {path}")]
    MarkerNotFound { path: PathBuf, marker: String },

    #[error("Failed to parse {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {path} must contain a JSON object at the top level")]
    ManifestShape { path: PathBuf },

    #[error("Field `{field}` in {path} must be a JSON object")]
    ManifestField { path: PathBuf, field: String },

    #[error("Invalid template manifest {path}: {source}")]
    TemplateManifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // External process errors
    #[error("Failed to run `{command}`: {source}")]
    InstallerSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    InstallerFailed { command: String, code: i32 },

    // Not a failure
    #[error("Overwrite of {0} declined")]
    Declined(PathBuf),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error represents an intentional abort rather than a failure
    pub fn is_declined(&self) -> bool {
        matches!(self, Self::Declined(_))
    }
}
