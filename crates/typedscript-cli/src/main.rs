//! typedscript - scaffolding for TypeScript services, packages and monorepos

use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use typedscript_core::config::{PACKAGE_MANAGER_ENV, TEMPLATE_DIR_ENV};
use typedscript_core::tui::CreateArgs;
use typedscript_core::TemplateStore;

/// CLI version - used for template compatibility checking
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "typedscript")]
#[command(about = "CLI for scaffolding TypeScript services, packages and monorepos")]
#[command(version)]
pub struct Args {
    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
    /// List the bundled templates and the features they offer
    Templates(TemplatesArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name (service projects get a `-service` suffix)
    pub name: Option<String>,

    /// Project type: base, service, package, empty or monorepo
    #[arg(short = 't', long = "type")]
    pub project_type: Option<String>,

    /// Framework for service projects: express or fastify
    #[arg(long)]
    pub framework: Option<String>,

    /// Features to add, in order (comma-separated: hot-reload,env-variables,api-documentation,containerization,linting,formatting)
    #[arg(short, long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir", env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,

    /// Package manager used to install dependencies (npm, pnpm, yarn, bun)
    #[arg(long = "package-manager", env = PACKAGE_MANAGER_ENV)]
    pub package_manager: Option<String>,

    /// Generate files only; don't install dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            project_type: args.project_type,
            framework: args.framework,
            features: args.features,
            template_dir: args.template_dir,
            package_manager: args.package_manager,
            skip_install: args.skip_install,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    /// Local directory containing templates (for development use)
    #[arg(long = "template-dir", env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so they don't interleave with prompt rendering on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);
    tracing::debug!("typedscript {}", CLI_VERSION);

    let result: anyhow::Result<()> = match args.command {
        Some(Command::Create(create_args)) => {
            typedscript_core::run(create_args.into(), CLI_VERSION).await
        }
        Some(Command::Templates(list_args)) => {
            TemplateStore::locate(list_args.template_dir.as_deref())
                .and_then(|store| store.print_catalog())
                .map_err(anyhow::Error::from)
        }
        // No subcommand provided, default to create behavior (interactive mode)
        None => typedscript_core::run(CreateArgs::default(), CLI_VERSION).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    fn env_of(subcommand: &str, id: &str) -> Option<String> {
        let command = Args::command();
        let arg = command
            .find_subcommand(subcommand)
            .and_then(|sub| sub.get_arguments().find(|a| a.get_id().as_str() == id))?;
        arg.get_env().and_then(OsStr::to_str).map(String::from)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_overrides_read_shared_env_names() {
        assert_eq!(
            env_of("create", "template_dir").as_deref(),
            Some(TEMPLATE_DIR_ENV)
        );
        assert_eq!(
            env_of("create", "package_manager").as_deref(),
            Some(PACKAGE_MANAGER_ENV)
        );
        assert_eq!(
            env_of("templates", "template_dir").as_deref(),
            Some(TEMPLATE_DIR_ENV)
        );
    }

    #[test]
    fn test_features_split_on_commas() {
        let args = Args::try_parse_from([
            "typedscript",
            "create",
            "orders",
            "--type",
            "service",
            "--features",
            "linting,env-variables",
            "--skip-install",
        ])
        .unwrap();

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        assert_eq!(create.name.as_deref(), Some("orders"));
        assert_eq!(
            create.features,
            Some(vec!["linting".to_string(), "env-variables".to_string()])
        );
        assert!(create.skip_install);
    }
}
