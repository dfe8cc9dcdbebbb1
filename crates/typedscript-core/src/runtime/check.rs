//! Runtime detection for Node.js and the selected package manager

use crate::config::PackageManager;
use anyhow::Result;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if a package manager is available
pub fn check_package_manager(manager: PackageManager) -> RuntimeInfo {
    probe(manager.name(), &manager.program())
}

/// Check everything the install step needs; fails listing what is missing
pub fn check_install_runtimes(manager: PackageManager) -> Result<Vec<RuntimeInfo>> {
    let mut missing = Vec::new();

    let node = check_node();
    // bun ships its own runtime
    if !node.available && manager != PackageManager::Bun {
        missing.push("Node.js (install from https://nodejs.org)".to_string());
    }

    let pm = check_package_manager(manager);
    if !pm.available {
        missing.push(format!(
            "{} (install it or pass --package-manager / --skip-install)",
            manager.name()
        ));
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required tools:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok([node, pm].into_iter().filter(|r| r.available).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_reported_unavailable() {
        let info = probe("Nothing", "typedscript-definitely-not-installed");
        assert!(!info.available);
        assert!(info.version.is_none());
    }
}
