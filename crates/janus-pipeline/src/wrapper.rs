//! Core wrapper trait and continuation types.
//!
//! A [`Wrapper`] intercepts pipeline execution around the terminal repository
//! call. Each wrapper receives the *remaining* composed chain as a [`Next`]
//! continuation and may invoke it or short-circuit with its own outcome.
//!
//! Wrappers carry an explicit [`WrapperKind`] discriminant so the registry
//! can look them up without runtime type inspection.
//!
//! # Example
//!
//! ```ignore
//! use janus_pipeline::{Next, Verb, Wrapper, WrapperKind};
//! use janus_pipeline::context::FrameworkContext;
//! use janus_core::{BoxFuture, Request, Response, Result};
//!
//! struct TimingWrapper;
//!
//! impl Wrapper for TimingWrapper {
//!     fn kind(&self) -> WrapperKind {
//!         WrapperKind::Named("timing")
//!     }
//!
//!     fn process<'a>(
//!         &'a self,
//!         ctx: &'a FrameworkContext,
//!         verb: Verb,
//!         request: Request,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, Result<Response>> {
//!         Box::pin(async move {
//!             let start = std::time::Instant::now();
//!             let response = next.run(ctx, request).await;
//!             tracing::debug!(verb = %verb, elapsed = ?start.elapsed(), "handled");
//!             response
//!         })
//!     }
//! }
//! ```

use crate::context::FrameworkContext;
use janus_core::{BoxFuture, Request, Response, Result};

/// The six repository operations a request can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Collection query by key.
    Find,
    /// Single item fetch by key and id.
    Get,
    /// Create with key, id and payload.
    Post,
    /// Full replace with key and payload.
    Put,
    /// Partial update with key, id and payload.
    Patch,
    /// Delete by key and id.
    Delete,
}

impl Verb {
    /// Returns the verb name used for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Returns all verbs.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Find,
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
        ]
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit discriminant identifying a registered wrapper.
///
/// Lookup by kind replaces runtime type inspection: the registry scans the
/// ordered wrapper list for the first wrapper whose kind matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// IP allow/deny access control.
    IpFirewall,
    /// Outermost fault boundary.
    SafetyNet,
    /// Verb-to-repository adapter.
    Accessor,
    /// A custom wrapper identified by name.
    Named(&'static str),
}

/// A middleware unit intercepting pipeline execution.
///
/// # Invariants
///
/// - `process` MUST invoke `next.run()` exactly once, unless it
///   short-circuits with its own outcome
/// - wrappers are registered during boot and never mutated while serving
/// - a wrapper may consult the [`FrameworkContext`] for sibling lookups but
///   never owns it
pub trait Wrapper: Send + Sync + 'static {
    /// Returns the kind discriminant for registry lookups.
    fn kind(&self) -> WrapperKind;

    /// Intercepts a verb invocation.
    ///
    /// Returning an `Err` propagates the fault to the next outer wrapper;
    /// only a safety-net wrapper at the outermost position is guaranteed to
    /// terminate propagation.
    fn process<'a>(
        &'a self,
        ctx: &'a FrameworkContext,
        verb: Verb,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Response>>;

    /// Intercepts the generic error path.
    ///
    /// The default forwards to the continuation unchanged; most wrappers
    /// only care about the dispatch path.
    fn on_error<'a>(
        &'a self,
        ctx: &'a FrameworkContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(next.run(ctx, request))
    }
}

/// The remainder of a composed chain, including the terminal operation.
///
/// A `Next` is constructed fresh per invocation from the current registry
/// snapshot and consumed on [`run`](Next::run), so it can only be invoked
/// once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    /// More wrappers on the verb-dispatch path.
    Dispatch {
        wrapper: &'a dyn Wrapper,
        verb: Verb,
        next: Box<Next<'a>>,
    },
    /// More wrappers on the generic error path.
    ErrorPath {
        wrapper: &'a dyn Wrapper,
        next: Box<Next<'a>>,
    },
    /// End of chain.
    Terminal(Box<dyn FnOnce(Request) -> BoxFuture<'static, Result<Response>> + Send + 'a>),
}

impl<'a> Next<'a> {
    /// Creates a `Next` that will invoke the wrapper's dispatch intercept.
    pub(crate) fn dispatch(wrapper: &'a dyn Wrapper, verb: Verb, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Dispatch {
                wrapper,
                verb,
                next: Box::new(next),
            },
        }
    }

    /// Creates a `Next` that will invoke the wrapper's error intercept.
    pub(crate) fn error_path(wrapper: &'a dyn Wrapper, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::ErrorPath {
                wrapper,
                next: Box::new(next),
            },
        }
    }

    /// Creates a terminal `Next` that invokes the given operation.
    ///
    /// Exposed so wrapper implementations can be exercised in isolation.
    pub fn terminal<F>(f: F) -> Self
    where
        F: FnOnce(Request) -> BoxFuture<'static, Result<Response>> + Send + 'a,
    {
        Self {
            inner: NextInner::Terminal(Box::new(f)),
        }
    }

    /// Invokes the next wrapper or the terminal operation.
    ///
    /// Consumes `self` so the remainder of the chain runs at most once.
    pub async fn run(self, ctx: &FrameworkContext, request: Request) -> Result<Response> {
        match self.inner {
            NextInner::Dispatch {
                wrapper,
                verb,
                next,
            } => wrapper.process(ctx, verb, request, *next).await,
            NextInner::ErrorPath { wrapper, next } => wrapper.on_error(ctx, request, *next).await,
            NextInner::Terminal(terminal) => terminal(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;

    fn ok_response() -> Response {
        http::Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from_static(b"OK")))
            .unwrap()
    }

    struct MarkerWrapper {
        name: &'static str,
    }

    impl Wrapper for MarkerWrapper {
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

    #[test]
    fn test_verb_names() {
        assert_eq!(Verb::Find.as_str(), "find");
        assert_eq!(Verb::Get.as_str(), "get");
        assert_eq!(Verb::Post.as_str(), "post");
        assert_eq!(Verb::Put.as_str(), "put");
        assert_eq!(Verb::Patch.as_str(), "patch");
        assert_eq!(Verb::Delete.as_str(), "delete");
        assert_eq!(Verb::all().len(), 6);
    }

    #[test]
    fn test_wrapper_kind_equality() {
        assert_eq!(WrapperKind::IpFirewall, WrapperKind::IpFirewall);
        assert_ne!(WrapperKind::IpFirewall, WrapperKind::SafetyNet);
        assert_eq!(WrapperKind::Named("a"), WrapperKind::Named("a"));
        assert_ne!(WrapperKind::Named("a"), WrapperKind::Named("b"));
    }

    #[tokio::test]
    async fn test_terminal_next() {
        let ctx = FrameworkContext::new();
        let next = Next::terminal(|_req| Box::pin(async { Ok(ok_response()) }));

        let response = next.run(&ctx, Request::new("users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chained_next_reaches_terminal() {
        let ctx = FrameworkContext::new();
        let outer = MarkerWrapper { name: "outer" };
        let inner = MarkerWrapper { name: "inner" };

        let terminal = Next::terminal(|_req| Box::pin(async { Ok(ok_response()) }));
        let chain = Next::dispatch(&outer, Verb::Get, Next::dispatch(&inner, Verb::Get, terminal));

        let response = chain.run(&ctx, Request::new("users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_default_error_intercept_forwards() {
        let ctx = FrameworkContext::new();
        let wrapper = MarkerWrapper { name: "pass" };

        let terminal = Next::terminal(|_req| Box::pin(async { Ok(ok_response()) }));
        let chain = Next::error_path(&wrapper, terminal);

        let response = chain.run(&ctx, Request::new("users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
