//! Outermost fault boundary.
//!
//! [`SafetyNetWrapper`] bounds faults escaping every inner layer: any error
//! still propagating on the dispatch path is converted here into a structured
//! response, 500 unless the error carries its own status. On the generic
//! error path it simply forwards; errors already handled by an inner wrapper
//! are not re-translated.
//!
//! Register it at [`Priority::LOW`](crate::registry::Priority::LOW) so it
//! sits outermost in the composed chain.

use crate::context::FrameworkContext;
use crate::wrapper::{Next, Verb, Wrapper, WrapperKind};
use janus_core::{BoxFuture, Error, MessageProcessor, Request, Response, Result};
use std::sync::Arc;

/// Wrapper converting uncaught faults into generic error responses.
pub struct SafetyNetWrapper {
    message_processor: Arc<dyn MessageProcessor>,
}

impl SafetyNetWrapper {
    /// Creates a safety net building responses with the given processor.
    #[must_use]
    pub fn new(message_processor: Arc<dyn MessageProcessor>) -> Self {
        Self { message_processor }
    }

    fn convert(&self, error: &Error) -> Response {
        if matches!(error, Error::Internal { .. }) {
            tracing::error!(error = ?error, "uncaught fault reached the safety net");
        } else {
            tracing::warn!(error = %error, "error reached the safety net");
        }
        let translation = error.translate();
        self.message_processor
            .build_error(translation.status, translation.message.as_deref())
    }
}

impl Wrapper for SafetyNetWrapper {
    fn kind(&self) -> WrapperKind {
        WrapperKind::SafetyNet
    }

    fn process<'a>(
        &'a self,
        ctx: &'a FrameworkContext,
        _verb: Verb,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(async move {
            match next.run(ctx, request).await {
                Ok(response) => Ok(response),
                Err(error) => Ok(self.convert(&error)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;
    use janus_core::JsonMessageProcessor;

    fn safety_net() -> SafetyNetWrapper {
        SafetyNetWrapper::new(Arc::new(JsonMessageProcessor::new()))
    }

    fn failing_terminal(error: Error) -> Next<'static> {
        Next::terminal(move |_req| Box::pin(async move { Err(error) }))
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let ctx = FrameworkContext::new();
        let next = Next::terminal(|_req| {
            Box::pin(async {
                Ok(http::Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::from_static(b"fine")))
                    .unwrap())
            })
        });

        let response = safety_net()
            .process(&ctx, Verb::Get, Request::new("users"), next)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_uncaught_fault_becomes_500() {
        let ctx = FrameworkContext::new();
        let next = failing_terminal(Error::internal("leaked detail"));

        let response = safety_net()
            .process(&ctx, Verb::Get, Request::new("users"), next)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_self_describing_error_keeps_status() {
        let ctx = FrameworkContext::new();
        let next = failing_terminal(Error::forbidden("address denied"));

        let response = safety_net()
            .process(&ctx, Verb::Get, Request::new("users"), next)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_error_path_forwards() {
        let ctx = FrameworkContext::new();
        let next = Next::terminal(|_req| {
            Box::pin(async {
                Ok(http::Response::builder()
                    .status(StatusCode::BAD_GATEWAY)
                    .body(Full::new(Bytes::new()))
                    .unwrap())
            })
        });

        // The error path exists to bound uncaught faults, not to
        // re-translate responses built by inner layers.
        let response = safety_net()
            .on_error(&ctx, Request::new("users"), next)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
