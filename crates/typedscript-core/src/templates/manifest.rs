//! Template manifest types and parsing

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::features::FeatureFlag;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-template metadata file; never copied into projects
pub const MANIFEST_FILE: &str = "template.yaml";

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version of the template itself
    pub version: String,

    /// Oldest CLI version able to generate this template
    #[serde(default)]
    pub min_cli_version: Option<String>,

    /// Entry file, relative to the project root
    #[serde(default)]
    pub entry: Option<String>,

    /// Module where the application instance is configured
    #[serde(default)]
    pub app_file: Option<String>,

    /// Script named in the "next steps" after generation
    #[serde(default = "default_run_script")]
    pub run_script: String,

    /// Feature tokens offered for this template
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_run_script() -> String {
    "start".to_string()
}

impl TemplateManifest {
    /// Load a manifest from a template directory
    pub fn load(template_dir: &Path) -> ScaffoldResult<Self> {
        let path = template_dir.join(MANIFEST_FILE);
        let content =
            std::fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        serde_yaml::from_str(&content)
            .map_err(|source| ScaffoldError::TemplateManifest { path, source })
    }

    /// Features offered by this template, in manifest order.
    /// Tokens the registry does not know are dropped.
    pub fn offered_features(&self) -> Vec<FeatureFlag> {
        self.features
            .iter()
            .filter_map(|token| FeatureFlag::from_token(token))
            .collect()
    }

    /// Check if a feature is offered by this template
    pub fn offers(&self, flag: FeatureFlag) -> bool {
        self.offered_features().contains(&flag)
    }
}
