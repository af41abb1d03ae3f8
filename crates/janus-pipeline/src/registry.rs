//! Priority-tiered wrapper registry.
//!
//! The registry holds every registered wrapper tagged by [`Priority`] and
//! produces the deterministic execution order the composition engine folds
//! over. Lower priority values sit further out in the composed chain, so a
//! safety net or firewall registers at [`Priority::LOW`] while the accessor
//! adapter sits innermost at [`Priority::HIGH`].
//!
//! Lifecycle: populated during boot, read-only while serving, and fully
//! clearable for test isolation. None of its operations can fail.

use crate::wrapper::{Wrapper, WrapperKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ordered integer rank controlling wrapper nesting.
///
/// Lower value = evaluated earlier = more outer in the composed chain.
/// Custom values are permitted alongside the built-in tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u32);

impl Priority {
    /// Outermost built-in tier (safety nets, firewalls).
    pub const LOW: Self = Self(10);
    /// Default tier.
    pub const NORMAL: Self = Self(20);
    /// Innermost built-in tier (terminal-adjacent adapters).
    pub const HIGH: Self = Self(30);

    /// Creates a custom priority value.
    #[must_use]
    pub const fn custom(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw priority value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// The set of registered wrappers, grouped by priority tier.
///
/// Insertion order is preserved within a tier; the same wrapper kind may be
/// registered any number of times.
#[derive(Default)]
pub struct PipelineRegistry {
    tiers: BTreeMap<Priority, Vec<Arc<dyn Wrapper>>>,
}

impl PipelineRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wrapper at the given priority.
    pub fn register<W: Wrapper>(&mut self, wrapper: W, priority: Priority) {
        self.register_shared(Arc::new(wrapper), priority);
    }

    /// Registers an already-shared wrapper at the given priority.
    pub fn register_shared(&mut self, wrapper: Arc<dyn Wrapper>, priority: Priority) {
        tracing::debug!(
            kind = ?wrapper.kind(),
            priority = priority.value(),
            "wrapper registered"
        );
        self.tiers.entry(priority).or_default().push(wrapper);
    }

    /// Empties all tiers. Idempotent.
    pub fn clear(&mut self) {
        self.tiers.clear();
    }

    /// Returns the wrappers in execution order.
    ///
    /// Tiers are concatenated by ascending priority value; within a tier,
    /// registration order is preserved. This ordering is the single source
    /// of truth for chain composition.
    #[must_use]
    pub fn ordered_wrappers(&self) -> Vec<Arc<dyn Wrapper>> {
        self.tiers
            .values()
            .flat_map(|tier| tier.iter().cloned())
            .collect()
    }

    /// Returns the first wrapper of the given kind in execution order.
    #[must_use]
    pub fn find_by_kind(&self, kind: WrapperKind) -> Option<Arc<dyn Wrapper>> {
        self.tiers
            .values()
            .flat_map(|tier| tier.iter())
            .find(|wrapper| wrapper.kind() == kind)
            .cloned()
    }

    /// Returns the total number of registered wrappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    /// Returns `true` if no wrappers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::FrameworkContext;
    use crate::wrapper::{Next, Verb};
    use janus_core::{BoxFuture, Request, Response, Result};

    struct NamedWrapper {
        name: &'static str,
    }

    impl Wrapper for NamedWrapper {
        fn kind(&self) -> WrapperKind {
            WrapperKind::Named(self.name)
        }

        fn process<'a>(
            &'a self,
            ctx: &'a FrameworkContext,
            _verb: Verb,
            request: Request,
            next: Next<'a>,
        ) -> BoxFuture<'a, Result<Response>> {
            Box::pin(async move { next.run(ctx, request).await })
        }
    }

    fn kinds(registry: &PipelineRegistry) -> Vec<WrapperKind> {
        registry
            .ordered_wrappers()
            .iter()
            .map(|w| w.kind())
            .collect()
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::LOW < Priority::NORMAL);
        assert!(Priority::NORMAL < Priority::HIGH);
        assert!(Priority::custom(15) > Priority::LOW);
        assert!(Priority::custom(15) < Priority::NORMAL);
        assert_eq!(Priority::LOW.value(), 10);
        assert_eq!(Priority::NORMAL.value(), 20);
        assert_eq!(Priority::HIGH.value(), 30);
        assert_eq!(Priority::default(), Priority::NORMAL);
    }

    #[test]
    fn test_ordered_by_ascending_priority_regardless_of_registration_order() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "inner" }, Priority::HIGH);
        registry.register(NamedWrapper { name: "outer" }, Priority::LOW);
        registry.register(NamedWrapper { name: "middle" }, Priority::NORMAL);

        assert_eq!(
            kinds(&registry),
            vec![
                WrapperKind::Named("outer"),
                WrapperKind::Named("middle"),
                WrapperKind::Named("inner"),
            ]
        );
    }

    #[test]
    fn test_insertion_order_preserved_within_tier() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "first" }, Priority::NORMAL);
        registry.register(NamedWrapper { name: "second" }, Priority::NORMAL);
        registry.register(NamedWrapper { name: "third" }, Priority::NORMAL);

        assert_eq!(
            kinds(&registry),
            vec![
                WrapperKind::Named("first"),
                WrapperKind::Named("second"),
                WrapperKind::Named("third"),
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_allowed() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "dup" }, Priority::NORMAL);
        registry.register(NamedWrapper { name: "dup" }, Priority::NORMAL);

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "w" }, Priority::NORMAL);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.ordered_wrappers().is_empty());

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_find_by_kind_first_match_in_order() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "late" }, Priority::HIGH);
        registry.register(NamedWrapper { name: "early" }, Priority::LOW);

        let found = registry.find_by_kind(WrapperKind::Named("early")).unwrap();
        assert_eq!(found.kind(), WrapperKind::Named("early"));
    }

    #[test]
    fn test_find_by_kind_on_empty_registry() {
        let registry = PipelineRegistry::new();
        assert!(registry.find_by_kind(WrapperKind::SafetyNet).is_none());
    }

    #[test]
    fn test_find_by_kind_no_match() {
        let mut registry = PipelineRegistry::new();
        registry.register(NamedWrapper { name: "w" }, Priority::NORMAL);
        assert!(registry.find_by_kind(WrapperKind::IpFirewall).is_none());
    }
}
