//! Request pipeline composition engine.
//!
//! At request time the [`RequestPipeline`] takes the ordered wrapper list
//! from the registry and right-folds it around the terminal accessor
//! dispatch: the *last* (highest priority) wrapper wraps the terminal
//! operation and the *first* (lowest priority) wrapper is outermost. The
//! lowest-priority wrapper therefore observes the request first and the
//! final response last, which is why safety nets and firewalls register at
//! low priority while the accessor adapter sits innermost.
//!
//! ```text
//! request → [low] → [normal] → [high] → accessor dispatch
//! response ← [low] ← [normal] ← [high] ←───────┘
//! ```
//!
//! The chain is built fresh per invocation from the current registry
//! snapshot; wrappers receive the *remaining* composed continuation and may
//! short-circuit without invoking it.

use crate::context::FrameworkContext;
use crate::wrapper::{Next, Verb};
use crate::wrappers::AccessorWrapper;
use janus_core::{Error, MessageProcessor, Repository, Request, Response, Result};
use std::sync::Arc;

/// Composes and executes the wrapper chain around repository dispatch.
pub struct RequestPipeline {
    accessor: Arc<AccessorWrapper>,
    message_processor: Arc<dyn MessageProcessor>,
}

impl RequestPipeline {
    /// Creates a pipeline dispatching to the given repository.
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository>,
        message_processor: Arc<dyn MessageProcessor>,
    ) -> Self {
        Self {
            accessor: Arc::new(AccessorWrapper::new(
                repository,
                Arc::clone(&message_processor),
            )),
            message_processor,
        }
    }

    /// Executes a verb invocation through the composed chain.
    ///
    /// Returns `Err` only when a fault escapes every registered wrapper;
    /// with a safety net registered at low priority this cannot happen and
    /// callers always receive a structured response.
    pub async fn execute(
        &self,
        ctx: &FrameworkContext,
        verb: Verb,
        request: Request,
    ) -> Result<Response> {
        let ordered = ctx.ordered_wrappers();

        let accessor = Arc::clone(&self.accessor);
        let mut next = Next::terminal(move |req| {
            Box::pin(async move { Ok(accessor.dispatch(verb, req).await) })
        });

        // Right fold: the last wrapper wraps the terminal call, the first
        // wrapper ends up outermost.
        for wrapper in ordered.iter().rev() {
            next = Next::dispatch(wrapper.as_ref(), verb, next);
        }

        next.run(ctx, request).await
    }

    /// Runs the generic error path for a failure raised outside verb
    /// dispatch.
    ///
    /// The error intercepts of all registered wrappers compose in the same
    /// order as the dispatch path, around a terminal that builds the error
    /// response from the translation table.
    pub async fn error(&self, ctx: &FrameworkContext, request: Request, error: Error) -> Response {
        let ordered = ctx.ordered_wrappers();

        let message_processor = Arc::clone(&self.message_processor);
        let mut next = Next::terminal(move |_req| {
            Box::pin(async move {
                let translation = error.translate();
                Ok(message_processor.build_error(translation.status, translation.message.as_deref()))
            })
        });

        for wrapper in ordered.iter().rev() {
            next = Next::error_path(wrapper.as_ref(), next);
        }

        match next.run(ctx, request).await {
            Ok(response) => response,
            Err(error) => {
                // An error intercept failed while handling an error; fall
                // back to the bare translation.
                tracing::error!(error = ?error, "error path failed");
                let translation = error.translate();
                self.message_processor
                    .build_error(translation.status, translation.message.as_deref())
            }
        }
    }
}
