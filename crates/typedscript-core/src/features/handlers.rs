//! One handler per feature flag
//!
//! Handlers queue dependencies and patch the freshly copied project. They
//! insert with [`insert_before`] so several features can share a marker.

use super::deps::DependencyList;
use super::FeatureFlag;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::patch::{edit_field, insert_before, Marker, PACKAGE_JSON};
use crate::project::Framework;
use crate::templates::{Template, TemplateManifest, TemplateStore};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything a handler may read or mutate during one run
pub struct FeatureContext<'a> {
    pub project_dir: &'a Path,
    pub project_name: &'a str,
    pub template: Template,
    pub manifest: &'a TemplateManifest,
    pub store: &'a TemplateStore,
    pub dependencies: &'a mut DependencyList,
}

impl FeatureContext<'_> {
    fn package_json(&self) -> PathBuf {
        self.project_dir.join(PACKAGE_JSON)
    }

    fn declared_file(&self, flag: FeatureFlag, file: Option<&str>) -> ScaffoldResult<PathBuf> {
        file.map(|f| self.project_dir.join(f))
            .ok_or_else(|| self.unsupported(flag))
    }

    fn entry_file(&self, flag: FeatureFlag) -> ScaffoldResult<PathBuf> {
        self.declared_file(flag, self.manifest.entry.as_deref())
    }

    fn app_file(&self, flag: FeatureFlag) -> ScaffoldResult<PathBuf> {
        self.declared_file(flag, self.manifest.app_file.as_deref())
    }

    fn unsupported(&self, flag: FeatureFlag) -> ScaffoldError {
        ScaffoldError::UnsupportedFeature {
            feature: flag.token().to_string(),
            template: self.template.id().to_string(),
        }
    }

    fn add_scripts(&self, scripts: &[(&str, String)]) -> ScaffoldResult<()> {
        let manifest = self.package_json();
        edit_field(&manifest, "scripts", |current| {
            merge_scripts(&manifest, current, scripts)
        })
    }
}

/// Add script entries without replacing scripts that already exist.
///
/// A missing or `null` field starts a new mapping; any other non-object value
/// is an error rather than something to overwrite.
pub fn merge_scripts(
    manifest: &Path,
    current: Option<Value>,
    additions: &[(&str, String)],
) -> ScaffoldResult<Value> {
    let mut scripts = match current {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => Map::new(),
        Some(_) => {
            return Err(ScaffoldError::ManifestField {
                path: manifest.to_path_buf(),
                field: "scripts".to_string(),
            })
        }
    };

    for (name, command) in additions {
        if scripts.contains_key(*name) {
            debug!("Keeping existing script `{}`", name);
            continue;
        }
        scripts.insert((*name).to_string(), Value::String(command.clone()));
    }

    Ok(Value::Object(scripts))
}

/// Run the handler registered for `flag`
pub async fn apply(flag: FeatureFlag, ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    info!("Applying feature {}", flag);
    match flag {
        FeatureFlag::HotReload => hot_reload(ctx),
        FeatureFlag::EnvVariables => env_variables(ctx).await,
        FeatureFlag::ApiDocumentation => api_documentation(ctx).await,
        FeatureFlag::Containerization => containerization(ctx).await,
        FeatureFlag::Linting => linting(ctx).await,
        FeatureFlag::Formatting => formatting(ctx).await,
    }
}

fn hot_reload(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    let entry = ctx
        .manifest
        .entry
        .clone()
        .ok_or_else(|| ctx.unsupported(FeatureFlag::HotReload))?;

    ctx.dependencies.add_dev("tsx", "^4.19.2");
    ctx.add_scripts(&[("dev", format!("tsx watch {}", entry))])
}

async fn env_variables(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    let entry = ctx.entry_file(FeatureFlag::EnvVariables)?;

    ctx.store
        .copy_feature_assets(FeatureFlag::EnvVariables, None, ctx.project_dir)
        .await?;
    insert_before(&entry, Marker::IMPORTS, "import 'dotenv/config';")?;

    ctx.dependencies.add_dev("dotenv", "^16.4.7");
    Ok(())
}

async fn api_documentation(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    let flag = FeatureFlag::ApiDocumentation;
    let framework = ctx.template.framework().ok_or_else(|| ctx.unsupported(flag))?;
    let app = ctx.app_file(flag)?;

    ctx.store
        .copy_feature_assets(flag, Some(framework.id()), ctx.project_dir)
        .await?;

    match framework {
        Framework::Express => {
            insert_before(&app, Marker::IMPORTS, "import { setupSwagger } from './swagger';")?;
            insert_before(&app, Marker::SETUP, "setupSwagger(app);")?;
            ctx.dependencies.add_runtime("swagger-ui-express", "^5.0.1");
            ctx.dependencies.add_runtime("swagger-jsdoc", "^6.2.8");
            ctx.dependencies.add_dev("@types/swagger-ui-express", "^4.1.7");
            ctx.dependencies.add_dev("@types/swagger-jsdoc", "^6.0.4");
        }
        Framework::Fastify => {
            insert_before(
                &app,
                Marker::IMPORTS,
                "import { setupSwagger } from './swagger.js';",
            )?;
            insert_before(&app, Marker::SETUP, "await setupSwagger(app);")?;
            ctx.dependencies.add_runtime("@fastify/swagger", "^9.4.2");
            ctx.dependencies.add_runtime("@fastify/swagger-ui", "^5.2.1");
        }
    }

    Ok(())
}

async fn containerization(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    ctx.store
        .copy_feature_assets(FeatureFlag::Containerization, None, ctx.project_dir)
        .await?;

    let image = ctx.project_name;
    ctx.add_scripts(&[
        ("docker:build", format!("docker build -t {} .", image)),
        ("docker:run", format!("docker run --rm -p 3000:3000 {}", image)),
    ])
}

async fn linting(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    ctx.store
        .copy_feature_assets(FeatureFlag::Linting, None, ctx.project_dir)
        .await?;

    ctx.dependencies.add_dev("eslint", "^9.17.0");
    ctx.dependencies.add_dev("@eslint/js", "^9.17.0");
    ctx.dependencies.add_dev("typescript-eslint", "^8.18.2");
    ctx.add_scripts(&[
        ("lint", "eslint .".to_string()),
        ("lint:fix", "eslint . --fix".to_string()),
    ])
}

async fn formatting(ctx: &mut FeatureContext<'_>) -> ScaffoldResult<()> {
    ctx.store
        .copy_feature_assets(FeatureFlag::Formatting, None, ctx.project_dir)
        .await?;

    ctx.dependencies.add_dev("prettier", "^3.4.2");
    ctx.add_scripts(&[
        ("format", "prettier --write .".to_string()),
        ("format:check", "prettier --check .".to_string()),
    ])
}
