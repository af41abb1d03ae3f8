//! Framework context.
//!
//! The [`FrameworkContext`] is the explicit boot-time object owning the two
//! registries the pipeline reads while serving: the wrapper registry and the
//! format-writer registry. It is constructed once during boot, configured,
//! and then passed by reference into the request-serving path; wrappers see
//! it as `&FrameworkContext` for sibling and writer lookups and never own it.
//!
//! There is deliberately no ambient/global state and no locking: boot
//! completion happens-before the first dispatch, and the registries are
//! read-only afterwards. Hosts that want live reconfiguration must serialize
//! mutation against in-flight composition themselves.

use crate::registry::{PipelineRegistry, Priority};
use crate::wrapper::{Wrapper, WrapperKind};
use janus_core::Request;
use janus_format::{FormatWriter, FormatWriterRegistry};
use std::sync::Arc;

/// Boot-time framework state shared with every wrapper invocation.
#[derive(Default)]
pub struct FrameworkContext {
    wrappers: PipelineRegistry,
    writers: FormatWriterRegistry,
}

impl FrameworkContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a wrapper at the given priority.
    pub fn register<W: Wrapper>(&mut self, wrapper: W, priority: Priority) {
        self.wrappers.register(wrapper, priority);
    }

    /// Registers an already-shared wrapper at the given priority.
    pub fn register_shared(&mut self, wrapper: Arc<dyn Wrapper>, priority: Priority) {
        self.wrappers.register_shared(wrapper, priority);
    }

    /// Empties the wrapper registry. Idempotent.
    pub fn clear(&mut self) {
        self.wrappers.clear();
    }

    /// Returns the wrappers in execution order.
    #[must_use]
    pub fn ordered_wrappers(&self) -> Vec<Arc<dyn Wrapper>> {
        self.wrappers.ordered_wrappers()
    }

    /// Returns the first wrapper of the given kind in execution order.
    #[must_use]
    pub fn find_by_kind(&self, kind: WrapperKind) -> Option<Arc<dyn Wrapper>> {
        self.wrappers.find_by_kind(kind)
    }

    /// Registers a format writer.
    pub fn register_writer<W: FormatWriter + 'static>(&mut self, writer: W) {
        self.writers.register(writer);
    }

    /// Overrides the default content type for wildcard resolution.
    pub fn set_default_content_type(&mut self, content_type: impl Into<String>) {
        self.writers.set_default(content_type);
    }

    /// Resolves a content type to its writer, honoring the wildcard.
    #[must_use]
    pub fn resolve_writer(&self, content_type: &str) -> Option<Arc<dyn FormatWriter>> {
        self.writers.resolve(content_type)
    }

    /// Resolves the writer for what the request accepts.
    ///
    /// Convenience for content-negotiation wrappers; absence is for the
    /// caller to classify (typically as a 406).
    #[must_use]
    pub fn negotiate(&self, request: &Request) -> Option<Arc<dyn FormatWriter>> {
        self.resolve_writer(request.accepted_content_type())
    }
}
