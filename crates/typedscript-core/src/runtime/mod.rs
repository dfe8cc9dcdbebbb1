//! External tooling: runtime detection and dependency installation
//!
//! This module provides:
//! - Node.js / package manager detection
//! - The [`Installer`] seam and its package-manager implementation

pub mod check;
pub mod installer;

pub use check::{check_install_runtimes, check_node, check_package_manager, RuntimeInfo};
pub use installer::{Installer, PackageManagerInstaller, SkipInstall};
