//! Name-keyed profiler cache
//!
//! An explicit registry object replaces the ambient static singleton facade:
//! construct one registry, inject it into consumers, and each name lazily
//! resolves to a cached [`Profiler`] for the lifetime of the registry.

use std::collections::HashMap;

use crate::profiler::Profiler;

/// Name handed out when callers do not pick one.
pub const DEFAULT_PROFILER: &str = "global";

/// Lazily constructs and caches one [`Profiler`] per name.
#[derive(Debug, Default)]
pub struct ProfilerRegistry {
    instances: HashMap<String, Profiler>,
    order: Vec<String>,
}

impl ProfilerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The profiler for `name`, constructing it on first use.
    pub fn of(&mut self, name: &str) -> &mut Profiler {
        if !self.instances.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.instances.entry(name.to_string()).or_default()
    }

    /// The default-named profiler, constructing it on first use.
    pub fn of_default(&mut self) -> &mut Profiler {
        self.of(DEFAULT_PROFILER)
    }

    /// The profiler for `name`, if one was ever requested.
    pub fn get(&self, name: &str) -> Option<&Profiler> {
        self.instances.get(name)
    }

    /// Registered names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of cached instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True if no profiler has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_constructs_lazily_and_caches() {
        let mut registry = ProfilerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("web").is_none());

        registry.of("web").start("route");
        registry.of("web").stop("route");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("web").unwrap().count("route"), 1);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut registry = ProfilerRegistry::new();
        registry.of("a").start("x");
        registry.of("a").stop("x");
        registry.of("b").start("x");
        registry.of("b").start("x");
        registry.of("b").stop("x");
        registry.of("b").stop("x");

        assert_eq!(registry.get("a").unwrap().count("x"), 1);
        assert_eq!(registry.get("b").unwrap().count("x"), 2);
    }

    #[test]
    fn test_default_profiler_name() {
        let mut registry = ProfilerRegistry::new();
        registry.of_default().start("boot");
        registry.of_default().stop("boot");

        assert_eq!(registry.get(DEFAULT_PROFILER).unwrap().count("boot"), 1);
    }

    #[test]
    fn test_names_in_creation_order() {
        let mut registry = ProfilerRegistry::new();
        registry.of("zeta");
        registry.of("alpha");
        registry.of("zeta"); // cached, not re-registered

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
