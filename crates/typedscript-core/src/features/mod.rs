//! Feature flags and their handlers
//!
//! Flags form a closed set. Tokens the registry doesn't recognize never become
//! a [`FeatureFlag`]; the composer skips them so newer front-ends can pass
//! flags this build doesn't know yet.

pub mod deps;
pub mod handlers;

use std::fmt;

pub use deps::DependencyList;
pub use handlers::{apply, merge_scripts, FeatureContext};

/// Optional capability layered onto a generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    HotReload,
    EnvVariables,
    ApiDocumentation,
    Containerization,
    Linting,
    Formatting,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 6] = [
        FeatureFlag::HotReload,
        FeatureFlag::EnvVariables,
        FeatureFlag::ApiDocumentation,
        FeatureFlag::Containerization,
        FeatureFlag::Linting,
        FeatureFlag::Formatting,
    ];

    /// Canonical token, also the asset directory name
    pub fn token(&self) -> &'static str {
        match self {
            FeatureFlag::HotReload => "hot-reload",
            FeatureFlag::EnvVariables => "env-variables",
            FeatureFlag::ApiDocumentation => "api-documentation",
            FeatureFlag::Containerization => "containerization",
            FeatureFlag::Linting => "linting",
            FeatureFlag::Formatting => "formatting",
        }
    }

    /// Look up a flag by token (case-insensitive, common aliases accepted)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "hot-reload" | "watch" => Some(FeatureFlag::HotReload),
            "env-variables" | "env" | "dotenv" => Some(FeatureFlag::EnvVariables),
            "api-documentation" | "api-docs" | "openapi" | "swagger" => {
                Some(FeatureFlag::ApiDocumentation)
            }
            "containerization" | "docker" => Some(FeatureFlag::Containerization),
            "linting" | "eslint" => Some(FeatureFlag::Linting),
            "formatting" | "prettier" => Some(FeatureFlag::Formatting),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureFlag::HotReload => "Hot reload",
            FeatureFlag::EnvVariables => "Environment variables",
            FeatureFlag::ApiDocumentation => "API documentation",
            FeatureFlag::Containerization => "Containerization",
            FeatureFlag::Linting => "Linting",
            FeatureFlag::Formatting => "Formatting",
        }
    }

    /// Short hint shown next to the flag in the feature checklist
    pub fn hint(&self) -> &'static str {
        match self {
            FeatureFlag::HotReload => "tsx watch",
            FeatureFlag::EnvVariables => "dotenv + .env",
            FeatureFlag::ApiDocumentation => "OpenAPI UI at /docs",
            FeatureFlag::Containerization => "Dockerfile",
            FeatureFlag::Linting => "ESLint",
            FeatureFlag::Formatting => "Prettier",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
