//! typedscript core - template composition and file patching
//!
//! This library turns a [`ProjectRequest`] (name, project type, feature
//! tokens) into a TypeScript project on disk. It is used by the `typedscript`
//! binary but has no dependency on a particular front-end.
//!
//! # Architecture
//!
//! - **Leaf operations** - [`templates`] copies bundled trees, [`patch`] edits
//!   placeholder markers and JSON manifests, [`destination`] prepares the
//!   target directory
//! - **Composition** - [`features`] maps each flag to a handler and
//!   [`composer::generate`] runs the steps in order
//! - **Collaborators** - [`runtime::Installer`] wraps the package manager,
//!   [`destination::Confirmer`] wraps the overwrite prompt
//! - **CLI/TUI** - optional cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use typedscript_core::{composer, destination::AssumeYes, runtime::SkipInstall};
//! use typedscript_core::{GenerateContext, ProjectRequest, ProjectType, TemplateStore};
//!
//! let ctx = GenerateContext::new(std::env::current_dir()?, TemplateStore::locate(None)?);
//! let request = ProjectRequest::new("demo", ProjectType::Package, ["linting"])?;
//! let report = composer::generate(&request, &ctx, &AssumeYes, &SkipInstall).await?;
//! ```

pub mod composer;
pub mod config;
pub mod destination;
pub mod error;
pub mod features;
pub mod patch;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use composer::{generate, GenerationReport};
pub use config::{GenerateContext, PackageManager};
pub use error::{ScaffoldError, ScaffoldResult};
pub use features::{DependencyList, FeatureFlag};
pub use project::{Framework, ProjectRequest, ProjectType};
pub use templates::{Template, TemplateManifest, TemplateStore};

#[cfg(feature = "tui")]
pub use tui::run;
