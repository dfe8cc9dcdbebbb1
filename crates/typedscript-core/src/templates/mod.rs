//! Bundled templates: lookup, metadata and copying
//!
//! This module provides:
//! - The closed set of template identifiers ([`Template`])
//! - Template root discovery and feature asset lookup ([`TemplateStore`])
//! - Recursive copying that preserves empty directories
//! - Version compatibility checking against `template.yaml`

pub mod copier;
pub mod manifest;
pub mod version;

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::features::FeatureFlag;
use crate::project::Framework;
use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

pub use copier::{copy_tree, CopySummary};
pub use manifest::TemplateManifest;
pub use version::check_compatibility;

/// Directory under the template root holding per-feature asset trees
const FEATURES_DIR: &str = "features";

/// Bundled template identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Base,
    Express,
    Fastify,
    Package,
    Empty,
    Monorepo,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::Base,
        Template::Express,
        Template::Fastify,
        Template::Package,
        Template::Empty,
        Template::Monorepo,
    ];

    /// Directory name under the template root
    pub fn id(&self) -> &'static str {
        match self {
            Template::Base => "base",
            Template::Express => "express",
            Template::Fastify => "fastify",
            Template::Package => "package",
            Template::Empty => "empty",
            Template::Monorepo => "monorepo",
        }
    }

    /// HTTP framework the template's server is written against, if any
    pub fn framework(&self) -> Option<Framework> {
        match self {
            Template::Base | Template::Express => Some(Framework::Express),
            Template::Fastify => Some(Framework::Fastify),
            Template::Package | Template::Empty | Template::Monorepo => None,
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Template {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| ScaffoldError::UnknownTemplate(s.to_string()))
    }
}

/// Location of the bundled templates on disk
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    /// Use an explicit template root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the template root.
    ///
    /// Order: `explicit` (flag or env), `templates/` next to the executable,
    /// then the workspace `templates/` directory this binary was built from.
    pub fn locate(explicit: Option<&Path>) -> ScaffoldResult<Self> {
        if let Some(path) = explicit {
            if !path.is_dir() {
                return Err(ScaffoldError::TemplateNotFound(path.to_path_buf()));
            }
            return Ok(Self::new(path));
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("templates")));

        let built_in = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");

        beside_exe
            .into_iter()
            .chain(std::iter::once(built_in))
            .find(|candidate| candidate.is_dir())
            .map(Self::new)
            .ok_or_else(|| ScaffoldError::TemplateNotFound(PathBuf::from("templates")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a template
    pub fn template_dir(&self, template: Template) -> PathBuf {
        self.root.join(template.id())
    }

    /// Read a template's `template.yaml`
    pub fn load_manifest(&self, template: Template) -> ScaffoldResult<TemplateManifest> {
        let dir = self.template_dir(template);
        if !dir.is_dir() {
            return Err(ScaffoldError::TemplateNotFound(dir));
        }
        TemplateManifest::load(&dir)
    }

    /// Copy a template into `destination`
    pub async fn copy_template(
        &self,
        template: Template,
        destination: &Path,
    ) -> ScaffoldResult<CopySummary> {
        let source = self.template_dir(template);
        info!("Copying {} template to {}", template, destination.display());
        let summary = copy_tree(&source, destination).await?;
        debug!(
            "Copied {} files and {} directories",
            summary.files.len(),
            summary.directories.len()
        );
        Ok(summary)
    }

    /// Asset directory for a feature, optionally narrowed to a variant
    /// (e.g. the framework-specific API docs helper)
    pub fn feature_dir(&self, flag: FeatureFlag, variant: Option<&str>) -> PathBuf {
        let dir = self.root.join(FEATURES_DIR).join(flag.token());
        match variant {
            Some(variant) => dir.join(variant),
            None => dir,
        }
    }

    /// Overlay a feature's asset files onto the project directory
    pub async fn copy_feature_assets(
        &self,
        flag: FeatureFlag,
        variant: Option<&str>,
        destination: &Path,
    ) -> ScaffoldResult<CopySummary> {
        let source = self.feature_dir(flag, variant);
        debug!("Adding {} assets from {}", flag, source.display());
        copy_tree(&source, destination).await
    }

    /// Print the bundled templates with their offered features
    pub fn print_catalog(&self) -> ScaffoldResult<()> {
        println!(
            "{}",
            format!("Templates in {}", self.root.display()).cyan().bold()
        );
        println!();

        for template in Template::ALL {
            match self.load_manifest(template) {
                Ok(manifest) => {
                    println!(
                        "  {} {} - {}",
                        "->".blue(),
                        template.id().bold(),
                        manifest.description
                    );
                    let features: Vec<&str> = manifest
                        .offered_features()
                        .iter()
                        .map(|f| f.token())
                        .collect();
                    if !features.is_empty() {
                        println!("     {} {}", "features:".dimmed(), features.join(", "));
                    }
                }
                Err(e) => {
                    eprintln!("  {} {}: {}", "Warning:".yellow(), template.id(), e);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids_round_trip() {
        for template in Template::ALL {
            assert_eq!(template.id().parse::<Template>().unwrap(), template);
        }
    }

    #[test]
    fn test_unknown_template_is_configuration_error() {
        assert!(matches!(
            "swagger".parse::<Template>(),
            Err(ScaffoldError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_feature_dir_layout() {
        let store = TemplateStore::new("/tpl");
        assert_eq!(
            store.feature_dir(FeatureFlag::ApiDocumentation, Some("fastify")),
            PathBuf::from("/tpl/features/api-documentation/fastify")
        );
        assert_eq!(
            store.feature_dir(FeatureFlag::Linting, None),
            PathBuf::from("/tpl/features/linting")
        );
    }

    #[test]
    fn test_locate_rejects_missing_explicit_dir() {
        let err = TemplateStore::locate(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound(_)));
    }

    #[test]
    fn test_bundled_templates_have_manifests() {
        let store = TemplateStore::locate(None).unwrap();
        for template in Template::ALL {
            let manifest = store.load_manifest(template).unwrap();
            assert!(!manifest.name.is_empty(), "{} has no name", template);
        }
    }
}
