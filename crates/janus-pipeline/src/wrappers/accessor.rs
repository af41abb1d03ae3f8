//! Verb-to-repository adapter.
//!
//! [`AccessorWrapper`] adapts the six verb operations onto calls against a
//! [`Repository`] and turns every outcome into a response: successes wrap
//! the returned resource (empty for delete), failures flow through the error
//! translation table. Payload decoding is delegated to the message processor
//! and a decode failure is the terminal error for that invocation, translated
//! like any repository error.
//!
//! The accessor is terminal-adjacent: when registered as a wrapper it does
//! not invoke the continuation, because it *is* the end of the chain.

use crate::context::FrameworkContext;
use crate::wrapper::{Next, Verb, Wrapper, WrapperKind};
use janus_core::{
    BoxFuture, Error, MessageProcessor, Repository, Request, Resource, Response, Result,
};
use std::sync::Arc;

/// Adapts verb dispatch onto the repository capability set.
pub struct AccessorWrapper {
    repository: Arc<dyn Repository>,
    message_processor: Arc<dyn MessageProcessor>,
}

impl AccessorWrapper {
    /// Creates an accessor over the given repository and message processor.
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository>,
        message_processor: Arc<dyn MessageProcessor>,
    ) -> Self {
        Self {
            repository,
            message_processor,
        }
    }

    /// Dispatches a verb invocation and produces a response.
    ///
    /// Never fails: every error is recovered here into an error response via
    /// the translation table.
    pub async fn dispatch(&self, verb: Verb, request: Request) -> Response {
        match self.invoke(verb, &request).await {
            Ok(resource) => self
                .message_processor
                .build_success(&request, resource.as_ref()),
            Err(error) => {
                if matches!(error, Error::Internal { .. }) {
                    tracing::error!(verb = %verb, key = request.key(), error = ?error, "repository fault");
                } else {
                    tracing::debug!(verb = %verb, key = request.key(), error = %error, "dispatch failed");
                }
                let translation = error.translate();
                self.message_processor
                    .build_error(translation.status, translation.message.as_deref())
            }
        }
    }

    async fn invoke(&self, verb: Verb, request: &Request) -> Result<Option<Resource>> {
        let key = request.key();
        match verb {
            Verb::Find => self.repository.find(key).await.map(Some),
            Verb::Get => {
                let id = request.require_id()?;
                self.repository.get(key, id).await.map(Some)
            }
            Verb::Post => {
                let id = request.require_id()?;
                let payload = self.message_processor.decode_payload(request)?;
                self.repository.post(key, id, payload).await.map(Some)
            }
            Verb::Put => {
                let payload = self.message_processor.decode_payload(request)?;
                self.repository.put(key, payload).await.map(Some)
            }
            Verb::Patch => {
                let id = request.require_id()?;
                let payload = self.message_processor.decode_payload(request)?;
                self.repository.patch(key, id, payload).await.map(Some)
            }
            Verb::Delete => {
                let id = request.require_id()?;
                self.repository.delete(key, id).await.map(|()| None)
            }
        }
    }
}

impl Wrapper for AccessorWrapper {
    fn kind(&self) -> WrapperKind {
        WrapperKind::Accessor
    }

    fn process<'a>(
        &'a self,
        _ctx: &'a FrameworkContext,
        verb: Verb,
        request: Request,
        _next: Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(async move { Ok(self.dispatch(verb, request).await) })
    }
}
