//! Group Registry
//!
//! Name → group lookup shared by the transport server and the front API.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::info;

use crate::error::{CacheError, Result};
use crate::group::CacheGroup;

// == Registry ==
/// Register-once, read-many map of cache groups.
///
/// Each node builds one and shares it behind an `Arc`; tests build as many
/// isolated registries as they need.
#[derive(Debug, Default)]
pub struct Registry {
    groups: RwLock<HashMap<String, CacheGroup>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // == Register ==
    /// Adds `group` under its name. Names are unique.
    pub fn register(&self, group: CacheGroup) -> Result<()> {
        let mut groups = self.groups.write();
        if groups.contains_key(group.name()) {
            return Err(CacheError::Config(format!(
                "group {} is already registered",
                group.name()
            )));
        }
        info!(group = %group.name(), "group registered");
        groups.insert(group.name().to_string(), group);
        Ok(())
    }

    // == Get ==
    pub fn get(&self, name: &str) -> Option<CacheGroup> {
        self.groups.read().get(name).cloned()
    }

    /// All groups, ordered by name.
    pub fn groups(&self) -> Vec<CacheGroup> {
        let mut groups: Vec<CacheGroup> = self.groups.read().values().cloned().collect();
        groups.sort_by(|a, b| a.name().cmp(b.name()));
        groups
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{loader_fn, GroupBuilder};

    fn builder(name: &str) -> GroupBuilder {
        GroupBuilder::new(name).loader(loader_fn(|key: String| async move { Ok(key.into_bytes()) }))
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        let group = builder("scores").register(&registry).unwrap();

        let found = registry.get("scores").unwrap();
        assert_eq!(found.name(), group.name());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_config_error() {
        let registry = Registry::new();
        builder("scores").register(&registry).unwrap();

        let second = builder("scores").register(&registry);
        assert!(matches!(second, Err(CacheError::Config(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();
        builder("scores").register(&first).unwrap();
        builder("scores").register(&second).unwrap();

        assert!(first.get("scores").is_some());
        assert!(second.get("scores").is_some());
    }

    #[test]
    fn test_groups_sorted_by_name() {
        let registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            builder(name).register(&registry).unwrap();
        }

        let names: Vec<String> = registry
            .groups()
            .iter()
            .map(|g| g.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_registered_group_shares_state_with_handle() {
        let registry = Registry::new();
        let group = builder("echo").register(&registry).unwrap();

        group.get("hello").await.unwrap();

        assert!(registry.get("echo").unwrap().is_cached("hello"));
    }
}
