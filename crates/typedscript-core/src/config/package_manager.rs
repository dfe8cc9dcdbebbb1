//! Package manager selection and command lines

use crate::error::ScaffoldError;
use std::fmt;
use std::str::FromStr;

/// Environment variable forcing a package manager
pub const PACKAGE_MANAGER_ENV: &str = "TYPEDSCRIPT_PACKAGE_MANAGER";

/// Supported JavaScript package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Which dependency section an install targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Runtime,
    Development,
}

impl PackageManager {
    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Executable to spawn (`npm.cmd` and friends on Windows)
    pub fn program(&self) -> String {
        if cfg!(windows) && *self != PackageManager::Bun {
            format!("{}.cmd", self.name())
        } else {
            self.name().to_string()
        }
    }

    /// Infer the manager that launched us from `npm_config_user_agent`
    /// (set by `npx`, `pnpm dlx`, `yarn dlx` and `bunx`)
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let name = user_agent.split('/').next()?.trim();
        name.parse().ok()
    }

    /// Detect the package manager from the environment, defaulting to npm
    pub fn detect() -> Self {
        std::env::var("npm_config_user_agent")
            .ok()
            .and_then(|agent| Self::from_user_agent(&agent))
            .unwrap_or_default()
    }

    /// Arguments installing `packages` into the given dependency section
    pub fn add_args(&self, kind: DependencyKind, packages: &[String]) -> Vec<String> {
        let mut args: Vec<String> = match (self, kind) {
            (PackageManager::Npm, DependencyKind::Runtime) => vec!["install".into(), "--save".into()],
            (PackageManager::Npm, DependencyKind::Development) => {
                vec!["install".into(), "--save-dev".into()]
            }
            (PackageManager::Pnpm, DependencyKind::Runtime)
            | (PackageManager::Yarn, DependencyKind::Runtime)
            | (PackageManager::Bun, DependencyKind::Runtime) => vec!["add".into()],
            (PackageManager::Pnpm, DependencyKind::Development) => vec!["add".into(), "-D".into()],
            (PackageManager::Yarn, DependencyKind::Development)
            | (PackageManager::Bun, DependencyKind::Development) => {
                vec!["add".into(), "--dev".into()]
            }
        };
        args.extend(packages.iter().cloned());
        args
    }

    /// Arguments installing whatever the manifest already lists
    pub fn install_args(&self) -> Vec<String> {
        vec!["install".to_string()]
    }

    /// Command a user types to run a package script
    pub fn run_command(&self, script: &str) -> String {
        format!("{} run {}", self.name(), script)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(ScaffoldError::UnknownPackageManager(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_detection() {
        assert_eq!(
            PackageManager::from_user_agent("pnpm/9.15.0 npm/? node/v22.12.0 linux x64"),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(
            PackageManager::from_user_agent("npm/10.9.0 node/v22.12.0 darwin arm64 workspaces/false"),
            Some(PackageManager::Npm)
        );
        assert_eq!(PackageManager::from_user_agent("deno/2.1"), None);
    }

    #[test]
    fn test_dev_install_flags() {
        let deps = vec!["prettier@^3.4.2".to_string()];
        assert_eq!(
            PackageManager::Npm.add_args(DependencyKind::Development, &deps),
            ["install", "--save-dev", "prettier@^3.4.2"]
        );
        assert_eq!(
            PackageManager::Pnpm.add_args(DependencyKind::Development, &deps),
            ["add", "-D", "prettier@^3.4.2"]
        );
        assert_eq!(
            PackageManager::Yarn.add_args(DependencyKind::Runtime, &deps),
            ["add", "prettier@^3.4.2"]
        );
    }

    #[test]
    fn test_parse_and_run_command() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!("pip".parse::<PackageManager>().is_err());
        assert_eq!(PackageManager::Bun.run_command("dev"), "bun run dev");
    }
}
