//! In-place edits of generated files
//!
//! - [`placeholder`]: text insertion at `/* [[name]] */` markers and cleanup
//! - [`manifest`]: field-level edits of JSON manifests

pub mod manifest;
pub mod placeholder;

pub use manifest::{edit_field, read_field, PACKAGE_JSON};
pub use placeholder::{clear_all, contains_marker, insert_at, insert_before, Marker};
