//! # Janus Format
//!
//! Content negotiation for the Janus REST framework.
//!
//! A [`FormatWriter`] serializes a resource for one content type; the
//! [`FormatWriterRegistry`] maps content-type strings to writers and resolves
//! wildcard lookups against a default. The first writer ever registered
//! becomes the default unless overridden with
//! [`FormatWriterRegistry::set_default`].
//!
//! Resolution failure is not an error at this layer: [`resolve`] returns
//! `None` and the caller (content-negotiation middleware) decides whether
//! that is a 406-class failure.
//!
//! [`resolve`]: FormatWriterRegistry::resolve
//!
//! ## Example
//!
//! ```
//! use janus_format::{FormatWriterRegistry, JsonFormatWriter, CONTENT_TYPE_WILDCARD};
//!
//! let mut registry = FormatWriterRegistry::new();
//! registry.register(JsonFormatWriter::new());
//!
//! // First registered writer is the default, so the wildcard resolves to it.
//! let writer = registry.resolve(CONTENT_TYPE_WILDCARD).unwrap();
//! assert_eq!(writer.content_type(), "application/json");
//! ```

#![doc(html_root_url = "https://docs.rs/janus-format/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use bytes::Bytes;
use indexmap::IndexMap;
use janus_core::Resource;
use std::sync::Arc;

pub use janus_core::CONTENT_TYPE_WILDCARD;

/// A response serializer for one content type.
pub trait FormatWriter: Send + Sync {
    /// The content type this writer produces, e.g. `application/json`.
    fn content_type(&self) -> &str;

    /// Serializes the resource into wire bytes.
    fn write(&self, resource: &Resource) -> Bytes;
}

/// Maps content types to format writers.
///
/// Populated during boot and read-only afterwards; insertion order defines
/// the default writer (the first one registered), explicitly overridable.
#[derive(Default)]
pub struct FormatWriterRegistry {
    writers: IndexMap<String, Arc<dyn FormatWriter>>,
    default_content_type: Option<String>,
}

impl FormatWriterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a writer under its content type.
    ///
    /// The first writer ever registered becomes the default content type.
    /// Registering a second writer for the same content type replaces the
    /// first without affecting the default.
    pub fn register<W: FormatWriter + 'static>(&mut self, writer: W) {
        let content_type = writer.content_type().to_string();
        if self.default_content_type.is_none() {
            tracing::debug!(content_type = %content_type, "default format writer set");
            self.default_content_type = Some(content_type.clone());
        }
        self.writers.insert(content_type, Arc::new(writer));
    }

    /// Overrides the default content type.
    ///
    /// The type does not need to be registered yet; register-then-set and
    /// set-then-register are both legal. Resolution still requires the entry
    /// to exist at lookup time.
    pub fn set_default(&mut self, content_type: impl Into<String>) {
        self.default_content_type = Some(content_type.into());
    }

    /// Returns the current default content type, if any.
    #[must_use]
    pub fn default_content_type(&self) -> Option<&str> {
        self.default_content_type.as_deref()
    }

    /// Resolves a content type to its writer.
    ///
    /// The wildcard marker is substituted with the default content type
    /// before lookup. Returns `None` when no writer exists for the
    /// (possibly substituted) type; absence is the caller's decision to
    /// classify.
    #[must_use]
    pub fn resolve(&self, content_type: &str) -> Option<Arc<dyn FormatWriter>> {
        let content_type = if content_type == CONTENT_TYPE_WILDCARD {
            self.default_content_type.as_deref()?
        } else {
            content_type
        };

        self.writers.get(content_type).cloned()
    }
}

/// Stock JSON writer: serializes the resource data as compact JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatWriter;

impl JsonFormatWriter {
    /// Creates a new JSON format writer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FormatWriter for JsonFormatWriter {
    fn content_type(&self) -> &str {
        "application/json"
    }

    fn write(&self, resource: &Resource) -> Bytes {
        Bytes::from(serde_json::to_vec(resource.data()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubWriter {
        content_type: &'static str,
    }

    impl FormatWriter for StubWriter {
        fn content_type(&self) -> &str {
            self.content_type
        }

        fn write(&self, _resource: &Resource) -> Bytes {
            Bytes::from_static(b"stub")
        }
    }

    #[test]
    fn test_first_registered_is_default() {
        let mut registry = FormatWriterRegistry::new();
        registry.register(StubWriter {
            content_type: "application/hal+json",
        });
        registry.register(StubWriter {
            content_type: "application/xml",
        });

        assert_eq!(
            registry.default_content_type(),
            Some("application/hal+json")
        );
        let writer = registry.resolve(CONTENT_TYPE_WILDCARD).unwrap();
        assert_eq!(writer.content_type(), "application/hal+json");
    }

    #[test]
    fn test_set_default_overrides() {
        let mut registry = FormatWriterRegistry::new();
        registry.register(StubWriter {
            content_type: "application/hal+json",
        });
        registry.register(StubWriter {
            content_type: "application/xml",
        });
        registry.set_default("application/xml");

        let writer = registry.resolve(CONTENT_TYPE_WILDCARD).unwrap();
        assert_eq!(writer.content_type(), "application/xml");
    }

    #[test]
    fn test_set_default_before_register_is_legal() {
        let mut registry = FormatWriterRegistry::new();
        registry.set_default("application/xml");

        // Nothing registered for the default yet, so the wildcard resolves
        // to nothing.
        assert!(registry.resolve(CONTENT_TYPE_WILDCARD).is_none());

        registry.register(StubWriter {
            content_type: "application/xml",
        });
        assert!(registry.resolve(CONTENT_TYPE_WILDCARD).is_some());
    }

    #[test]
    fn test_unregistered_type_resolves_to_none() {
        let mut registry = FormatWriterRegistry::new();
        registry.register(JsonFormatWriter::new());

        assert!(registry.resolve("application/msgpack").is_none());
    }

    #[test]
    fn test_wildcard_on_empty_registry_resolves_to_none() {
        let registry = FormatWriterRegistry::new();
        assert!(registry.resolve(CONTENT_TYPE_WILDCARD).is_none());
    }

    #[test]
    fn test_concrete_lookup() {
        let mut registry = FormatWriterRegistry::new();
        registry.register(JsonFormatWriter::new());

        let writer = registry.resolve("application/json").unwrap();
        assert_eq!(writer.content_type(), "application/json");
    }

    #[test]
    fn test_json_writer_output() {
        let writer = JsonFormatWriter::new();
        let resource = Resource::new(json!({"id": "u1"}));
        assert_eq!(writer.write(&resource), Bytes::from(r#"{"id":"u1"}"#));
    }
}
