//! Dependency installation through an external package manager

use crate::config::{DependencyKind, PackageManager};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::features::DependencyList;
use async_trait::async_trait;
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

/// Installs the dependencies collected during composition
#[async_trait]
pub trait Installer: Send + Sync {
    /// Install everything in `dependencies` into `project_dir`.
    /// Empty lists must not fail.
    async fn install(&self, project_dir: &Path, dependencies: &DependencyList)
        -> ScaffoldResult<()>;
}

/// Runs the real package manager, streaming its output
#[derive(Debug, Clone)]
pub struct PackageManagerInstaller {
    manager: PackageManager,
    program: String,
}

/// Read one line, decoding invalid UTF-8 lossily.
///
/// `read_until` keeps partial reads in `buf` when a `select!` branch is
/// cancelled, so the buffer is cleared only after a full line is returned.
async fn read_line_lossy<R>(
    reader: Option<&mut R>,
    buf: &mut Vec<u8>,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(None);
    };
    let read = reader.read_until(b'\n', buf).await?;
    if read == 0 && buf.is_empty() {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    buf.clear();
    Ok(Some(line))
}

impl PackageManagerInstaller {
    pub fn new(manager: PackageManager) -> Self {
        Self {
            manager,
            program: manager.program(),
        }
    }

    #[cfg(test)]
    fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    /// Argument lists to run, in order.
    ///
    /// Runtime packages first, then development packages; with nothing
    /// queued a plain install still resolves what the template lists.
    pub fn plan(&self, dependencies: &DependencyList) -> Vec<Vec<String>> {
        if dependencies.is_empty() {
            return vec![self.manager.install_args()];
        }

        let mut plan = Vec::new();
        if !dependencies.runtime().is_empty() {
            plan.push(
                self.manager
                    .add_args(DependencyKind::Runtime, dependencies.runtime()),
            );
        }
        if !dependencies.development().is_empty() {
            plan.push(
                self.manager
                    .add_args(DependencyKind::Development, dependencies.development()),
            );
        }
        plan
    }

    /// Run one command, forwarding its output; returns the number of lines forwarded
    async fn run(&self, project_dir: &Path, args: &[String]) -> ScaffoldResult<usize> {
        let command = format!("{} {}", self.manager.name(), args.join(" "));
        println!();
        println!("{} {}", "Running:".dimmed(), command.yellow());
        println!();

        let mut child = TokioCommand::new(&self.program)
            .args(args)
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ScaffoldError::InstallerSpawn {
                command: command.clone(),
                source,
            })?;

        let mut stdout = child.stdout.take().map(BufReader::new);
        let mut stderr = child.stderr.take().map(BufReader::new);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut forwarded = 0;

        let read_failed = |source: std::io::Error| ScaffoldError::InstallerSpawn {
            command: command.clone(),
            source,
        };

        // Forward output until both streams reach EOF
        while stdout.is_some() || stderr.is_some() {
            tokio::select! {
                line = read_line_lossy(stdout.as_mut(), &mut stdout_buf), if stdout.is_some() => {
                    match line.map_err(read_failed)? {
                        Some(line) => {
                            println!("  {}", line);
                            forwarded += 1;
                        }
                        None => stdout = None,
                    }
                }
                line = read_line_lossy(stderr.as_mut(), &mut stderr_buf), if stderr.is_some() => {
                    match line.map_err(read_failed)? {
                        Some(line) => {
                            eprintln!("  {}", line.yellow());
                            forwarded += 1;
                        }
                        None => stderr = None,
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|source| ScaffoldError::InstallerSpawn {
                command: command.clone(),
                source,
            })?;
        println!();

        debug!("`{}` forwarded {} lines", command, forwarded);

        if status.success() {
            Ok(forwarded)
        } else {
            Err(ScaffoldError::InstallerFailed {
                command,
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

#[async_trait]
impl Installer for PackageManagerInstaller {
    async fn install(
        &self,
        project_dir: &Path,
        dependencies: &DependencyList,
    ) -> ScaffoldResult<()> {
        for args in self.plan(dependencies) {
            self.run(project_dir, &args).await?;
        }
        Ok(())
    }
}

/// Leaves installation to the user (`--skip-install`)
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipInstall;

#[async_trait]
impl Installer for SkipInstall {
    async fn install(
        &self,
        project_dir: &Path,
        dependencies: &DependencyList,
    ) -> ScaffoldResult<()> {
        info!(
            "Skipping install in {} ({} runtime, {} development packages pending)",
            project_dir.display(),
            dependencies.runtime().len(),
            dependencies.development().len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists_fall_back_to_plain_install() {
        let installer = PackageManagerInstaller::new(PackageManager::Npm);
        assert_eq!(installer.plan(&DependencyList::new()), vec![vec!["install"]]);
    }

    #[test]
    fn test_runtime_then_development() {
        let mut deps = DependencyList::new();
        deps.add_dev("tsx", "^4.19.2");
        deps.add_runtime("swagger-jsdoc", "^6.2.8");

        let plan = PackageManagerInstaller::new(PackageManager::Pnpm).plan(&deps);
        assert_eq!(
            plan,
            vec![
                vec!["add", "swagger-jsdoc@^6.2.8"],
                vec!["add", "-D", "tsx@^4.19.2"],
            ]
        );
    }

    #[test]
    fn test_only_non_empty_lists_are_installed() {
        let mut deps = DependencyList::new();
        deps.add_dev("prettier", "^3.4.2");

        let plan = PackageManagerInstaller::new(PackageManager::Npm).plan(&deps);
        assert_eq!(plan, vec![vec!["install", "--save-dev", "prettier@^3.4.2"]]);
    }

    #[cfg(unix)]
    fn shell_script(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_invalid_utf8_output_keeps_streaming() {
        let dir = tempfile::tempdir().unwrap();
        let installer = PackageManagerInstaller::new(PackageManager::Npm).with_program("sh");
        let script = shell_script(
            "printf 'before\\n'; printf 'bad \\377 byte\\n'; \
             i=0; while [ $i -lt 5000 ]; do echo \"line $i\"; i=$((i+1)); done; \
             printf 'warn\\n' >&2; exit 0",
        );

        let forwarded = installer.run(dir.path(), &script).await.unwrap();

        assert_eq!(forwarded, 5003);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_trailing_line_without_newline_is_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let installer = PackageManagerInstaller::new(PackageManager::Npm).with_program("sh");

        let forwarded = installer
            .run(dir.path(), &shell_script("printf 'one\\ntwo'"))
            .await
            .unwrap();

        assert_eq!(forwarded, 2);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_maps_to_installer_failed() {
        let dir = tempfile::tempdir().unwrap();
        let installer = PackageManagerInstaller::new(PackageManager::Pnpm).with_program("sh");

        let err = installer
            .run(dir.path(), &shell_script("echo partial; exit 3"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ScaffoldError::InstallerFailed { code: 3, ref command } if command.starts_with("pnpm")
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let installer = PackageManagerInstaller::new(PackageManager::Npm)
            .with_program("typedscript-definitely-not-installed");

        let err = installer
            .run(dir.path(), &["install".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InstallerSpawn { .. }));
    }

    #[tokio::test]
    async fn test_skip_install_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut deps = DependencyList::new();
        deps.add_dev("eslint", "^9.17.0");
        SkipInstall.install(dir.path(), &deps).await.unwrap();
    }
}
