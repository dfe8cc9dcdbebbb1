//! Interactive front-end for `typedscript create` (cliclack prompts)
//!
//! Collects the project name, type, framework and feature checklist, asks
//! before wiping an existing directory, then hands off to the composer.
//! Only compiled with the `tui` feature.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
