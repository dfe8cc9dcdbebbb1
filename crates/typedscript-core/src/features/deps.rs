//! Pending dependency lists collected by feature handlers

/// Runtime and development dependencies as `name@version` identifiers.
///
/// Insertion order is kept and repeated identifiers collapse to their first
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyList {
    runtime: Vec<String>,
    development: Vec<String>,
}

fn push_unique(list: &mut Vec<String>, id: String) -> bool {
    if list.contains(&id) {
        return false;
    }
    list.push(id);
    true
}

impl DependencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a runtime dependency; returns false if it was already queued
    pub fn add_runtime(&mut self, name: &str, version: &str) -> bool {
        push_unique(&mut self.runtime, format!("{}@{}", name, version))
    }

    /// Queue a development dependency; returns false if it was already queued
    pub fn add_dev(&mut self, name: &str, version: &str) -> bool {
        push_unique(&mut self.development, format!("{}@{}", name, version))
    }

    pub fn runtime(&self) -> &[String] {
        &self.runtime
    }

    pub fn development(&self) -> &[String] {
        &self.development
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_empty() && self.development.is_empty()
    }
}
