//! Charm-style CLI prompts using cliclack

use crate::composer::{self, GenerationReport};
use crate::config::GenerateContext;
use crate::destination::{is_affirmative, AssumeYes, Confirmer};
use crate::features::FeatureFlag;
use crate::project::{validate_name, Framework, ProjectRequest, ProjectType};
use crate::runtime::{self, Installer, PackageManagerInstaller, SkipInstall};
use crate::templates::{self, TemplateManifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name
    pub name: Option<String>,

    /// Project type token (base, service, package, empty, monorepo)
    pub project_type: Option<String>,

    /// Framework for service projects
    pub framework: Option<String>,

    /// Feature tokens, applied in the given order
    pub features: Option<Vec<String>>,

    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Package manager override
    pub package_manager: Option<String>,

    /// Don't run the package manager
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Free-text overwrite confirmation
struct PromptConfirmer;

impl Confirmer for PromptConfirmer {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
        cliclack::log::warning(format!("{} already exists", path.display()))?;
        let answer: String = cliclack::input("Remove it and start fresh? (y/N)")
            .placeholder("n")
            .default_input("n")
            .interact()?;
        Ok(is_affirmative(&answer))
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("typedscript")?;

    let working_dir = std::env::current_dir().context("Failed to read the current directory")?;
    let ctx = GenerateContext::from_overrides(
        &working_dir,
        args.template_dir.as_deref(),
        args.package_manager.as_deref(),
        cli_version,
    )?;

    if args.template_dir.is_some() {
        cliclack::log::info(format!(
            "Using local templates from {}",
            ctx.store.root().display()
        ))?;
    }

    // Step 1: Project name
    let name = select_name(&args)?;

    // Step 2: Project type (and framework for services)
    let project_type = select_project_type(&args)?;
    let template = project_type.template();
    let manifest = ctx.store.load_manifest(template)?;

    if let Some(warning) = templates::check_compatibility(cli_version, &manifest) {
        cliclack::log::warning(warning)?;
    }

    // Step 3: Features
    let features = select_features(&manifest, &args)?;
    let request = ProjectRequest::new(&name, project_type, &features)?;

    // Step 4: Tooling check
    if !args.skip_install {
        check_tools(&ctx)?;
    }

    // Step 5: Generate
    cliclack::log::step(format!(
        "Creating {} from the {} template",
        request.resolved_name(),
        template
    ))?;

    let confirmer: &dyn Confirmer = if args.yes {
        &AssumeYes
    } else {
        &PromptConfirmer
    };
    let package_installer = PackageManagerInstaller::new(ctx.package_manager);
    let installer: &dyn Installer = if args.skip_install {
        &SkipInstall
    } else {
        &package_installer
    };

    let report = match composer::generate(&request, &ctx, confirmer, installer).await {
        Ok(report) => report,
        Err(e) if e.is_declined() => {
            cliclack::outro_cancel("Aborted. Nothing was changed.")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // Step 6: Report
    print_report(&report, args.skip_install)?;

    Ok(())
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        validate_name(name)?;
        return Ok(name.clone());
    }

    if args.yes {
        anyhow::bail!("A project name is required in non-interactive mode.");
    }

    let name: String = cliclack::input("Project name")
        .placeholder("my-app")
        .validate(|input: &String| validate_name(input).map_err(|e| e.to_string()))
        .interact()?;
    Ok(name)
}

fn select_project_type(args: &CreateArgs) -> Result<ProjectType> {
    let kind: String = match &args.project_type {
        Some(kind) => kind.clone(),
        // Non-interactive runs fall back to the plain starter
        None if args.yes => "base".to_string(),
        None => {
            let kind: &str = cliclack::select("What are you building?")
                .item("service", "Service", "HTTP API on Express or Fastify")
                .item("package", "Package", "publishable TypeScript library")
                .item("monorepo", "Monorepo", "npm workspaces with apps/ and packages/")
                .item("base", "Base", "minimal Express starter")
                .item("empty", "Empty", "just a package.json")
                .interact()?;
            kind.to_string()
        }
    };

    let is_service = kind.trim().eq_ignore_ascii_case("service");
    let framework = match &args.framework {
        Some(framework) => framework.parse()?,
        None if is_service && !args.yes => {
            let mut select = cliclack::select("Which framework?");
            for framework in Framework::ALL {
                select = select.item(framework, framework.display_name(), "");
            }
            select.interact()?
        }
        None => Framework::default(),
    };

    Ok(ProjectType::parse(&kind, framework)?)
}

fn select_features(manifest: &TemplateManifest, args: &CreateArgs) -> Result<Vec<String>> {
    if let Some(features) = &args.features {
        return Ok(features.clone());
    }

    let offered = manifest.offered_features();
    if offered.is_empty() || args.yes {
        return Ok(Vec::new());
    }

    let mut multi = cliclack::multiselect("Select features (space to toggle)");
    for flag in &offered {
        multi = multi.item(*flag, flag.display_name(), flag.hint());
    }
    let selected: Vec<FeatureFlag> = multi.required(false).interact()?;

    // Keep the checklist order rather than the toggle order
    Ok(offered
        .into_iter()
        .filter(|flag| selected.contains(flag))
        .map(|flag| flag.token().to_string())
        .collect())
}

fn check_tools(ctx: &GenerateContext) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match runtime::check_install_runtimes(ctx.package_manager) {
        Ok(tools) => {
            let info: Vec<String> = tools
                .iter()
                .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected: {}", info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

fn print_report(report: &GenerationReport, skipped_install: bool) -> Result<()> {
    if !report.applied.is_empty() {
        let names: Vec<&str> = report.applied.iter().map(|f| f.display_name()).collect();
        cliclack::log::info(format!("Features: {}", names.join(", ")))?;
    }
    if !report.ignored.is_empty() {
        cliclack::log::remark(format!("Ignored unknown features: {}", report.ignored.join(", ")))?;
    }

    if skipped_install && !report.dependencies.is_empty() {
        let pending: Vec<&str> = report
            .dependencies
            .runtime()
            .iter()
            .chain(report.dependencies.development())
            .map(String::as_str)
            .collect();
        cliclack::log::warning(format!(
            "Install skipped. Pending packages: {}",
            pending.join(" ")
        ))?;
    }

    cliclack::log::success(format!(
        "Project {} ready in {}",
        report.project_name,
        report.project_dir.display()
    ))?;

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in report.next_steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
