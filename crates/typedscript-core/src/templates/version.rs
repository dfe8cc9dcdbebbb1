//! CLI / template version compatibility

use super::manifest::TemplateManifest;
use semver::Version;

/// Parse a version string, tolerating a leading `v`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Warning text when the running CLI is older than the template requires.
///
/// Templates without `min_cli_version`, or with versions that don't parse,
/// are always considered compatible.
pub fn check_compatibility(cli_version: &str, manifest: &TemplateManifest) -> Option<String> {
    let required = manifest.min_cli_version.as_deref()?;
    let cli = parse_version(cli_version)?;
    let min = parse_version(required)?;

    (cli < min).then(|| {
        format!(
            "The {} template needs typedscript {} or newer (running {}). \
             Upgrade with: cargo install typedscript-cli --force",
            manifest.name, required, cli_version
        )
    })
}
