//! Feature composition: one linear generation run
//!
//! resolve destination -> copy template -> project identity -> features in
//! request order -> clear placeholders -> install -> report.

use crate::config::GenerateContext;
use crate::destination::{self, Confirmer};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::features::{self, DependencyList, FeatureContext, FeatureFlag};
use crate::patch::{self, PACKAGE_JSON};
use crate::project::ProjectRequest;
use crate::runtime::Installer;
use crate::templates::{self, Template, TemplateManifest};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub project_dir: PathBuf,
    pub project_name: String,
    pub template: Template,
    /// Features applied, in application order
    pub applied: Vec<FeatureFlag>,
    /// Tokens that matched no registered feature
    pub ignored: Vec<String>,
    pub dependencies: DependencyList,
    pub next_steps: Vec<String>,
}

/// Turn request tokens into the flags to apply.
///
/// Unknown tokens are returned separately and never fail the run. A known
/// flag the template doesn't offer is a configuration error. Aliases that
/// resolve to an already selected flag are dropped.
pub fn plan_features(
    request: &ProjectRequest,
    template: Template,
    manifest: &TemplateManifest,
) -> ScaffoldResult<(Vec<FeatureFlag>, Vec<String>)> {
    let mut flags = Vec::new();
    let mut ignored = Vec::new();

    for token in request.features() {
        match FeatureFlag::from_token(token) {
            None => {
                warn!("Ignoring unknown feature `{}`", token);
                ignored.push(token.clone());
            }
            Some(flag) if !manifest.offers(flag) => {
                return Err(ScaffoldError::UnsupportedFeature {
                    feature: flag.token().to_string(),
                    template: template.id().to_string(),
                });
            }
            Some(flag) if flags.contains(&flag) => {}
            Some(flag) => flags.push(flag),
        }
    }

    Ok((flags, ignored))
}

/// Generate a project for `request`.
///
/// Every step completes before the next starts. Failures after the
/// destination was prepared leave the partial project on disk.
pub async fn generate<C, I>(
    request: &ProjectRequest,
    ctx: &GenerateContext,
    confirmer: &C,
    installer: &I,
) -> ScaffoldResult<GenerationReport>
where
    C: Confirmer + ?Sized,
    I: Installer + ?Sized,
{
    let template = request.project_type().template();
    let manifest = ctx.store.load_manifest(template)?;
    let (flags, ignored) = plan_features(request, template, &manifest)?;

    if let Some(warning) = templates::check_compatibility(&ctx.cli_version, &manifest) {
        warn!("{}", warning);
    }

    let project_name = request.resolved_name();
    let project_dir = ctx.project_dir(&project_name);

    // 1. destination
    destination::resolve(&project_dir, confirmer).await?;

    // 2. template
    ctx.store.copy_template(template, &project_dir).await?;

    // 3. identity
    patch::edit_field(&project_dir.join(PACKAGE_JSON), "name", |_| {
        Ok(Value::String(project_name.clone()))
    })?;

    // 4. features
    let mut dependencies = DependencyList::new();
    {
        let mut feature_ctx = FeatureContext {
            project_dir: &project_dir,
            project_name: &project_name,
            template,
            manifest: &manifest,
            store: &ctx.store,
            dependencies: &mut dependencies,
        };
        for flag in &flags {
            features::apply(*flag, &mut feature_ctx).await?;
        }
    }

    // 5. placeholders
    let cleaned = patch::clear_all(&project_dir)?;
    debug!("Cleared leftover placeholders in {} files", cleaned);

    // 6. install
    info!(
        "Installing {} runtime and {} development packages",
        dependencies.runtime().len(),
        dependencies.development().len()
    );
    installer.install(&project_dir, &dependencies).await?;

    // 7. report
    let mut next_steps = vec![format!("cd {}", project_name)];
    let scripts = patch::read_field(&project_dir.join(PACKAGE_JSON), "scripts")?;
    if scripts
        .as_ref()
        .and_then(|s| s.get(&manifest.run_script))
        .is_some()
    {
        next_steps.push(ctx.package_manager.run_command(&manifest.run_script));
    }

    Ok(GenerationReport {
        project_dir,
        project_name,
        template,
        applied: flags,
        ignored,
        dependencies,
        next_steps,
    })
}
