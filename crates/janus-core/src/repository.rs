//! Repository capability set.
//!
//! The repository is the external data-access collaborator the pipeline
//! invokes at its terminal point. Implementations live outside this core;
//! the pipeline only needs the six verb capabilities and the error taxonomy.

use crate::error::Result;
use crate::message::Payload;
use crate::BoxFuture;

/// An opaque resource representation.
///
/// The hypermedia model is out of scope for the pipeline core: a resource is
/// carried as a JSON value and handed to the format layer for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    data: serde_json::Value,
}

impl Resource {
    /// Creates a resource from a JSON value.
    #[must_use]
    pub fn new(data: serde_json::Value) -> Self {
        Self { data }
    }

    /// Returns the resource data.
    #[must_use]
    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    /// Consumes the resource, returning its data.
    #[must_use]
    pub fn into_data(self) -> serde_json::Value {
        self.data
    }
}

/// The repository capability set adapted by the accessor wrapper.
///
/// Each operation may fail with a domain error from the taxonomy in
/// [`crate::Error`]; the accessor wrapper translates failures into HTTP
/// responses, so repositories never deal in wire concerns.
pub trait Repository: Send + Sync {
    /// Queries the collection identified by `key`.
    fn find<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Resource>>;

    /// Fetches a single item by `key` and `id`.
    fn get<'a>(&'a self, key: &'a str, id: &'a str) -> BoxFuture<'a, Result<Resource>>;

    /// Creates an item under `key` with the given `id` and payload.
    fn post<'a>(
        &'a self,
        key: &'a str,
        id: &'a str,
        payload: Payload,
    ) -> BoxFuture<'a, Result<Resource>>;

    /// Fully replaces the resource under `key` with the payload.
    fn put<'a>(&'a self, key: &'a str, payload: Payload) -> BoxFuture<'a, Result<Resource>>;

    /// Partially updates the item identified by `key` and `id`.
    fn patch<'a>(
        &'a self,
        key: &'a str,
        id: &'a str,
        payload: Payload,
    ) -> BoxFuture<'a, Result<Resource>>;

    /// Deletes the item identified by `key` and `id`.
    fn delete<'a>(&'a self, key: &'a str, id: &'a str) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_round_trip() {
        let resource = Resource::new(json!({"id": "u1", "name": "alice"}));
        assert_eq!(resource.data()["name"], json!("alice"));
        assert_eq!(resource.into_data()["id"], json!("u1"));
    }

    #[test]
    fn test_default_resource_is_null() {
        assert_eq!(Resource::default().data(), &serde_json::Value::Null);
    }
}
