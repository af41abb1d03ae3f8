//! # Janus Core
//!
//! Core types and traits for the Janus REST framework.
//!
//! This crate defines the vocabulary shared by the pipeline and its
//! collaborators:
//!
//! - [`Error`] - the domain error taxonomy and its total translation to
//!   HTTP statuses
//! - [`Request`] / [`Response`] - the message types flowing through wrappers
//! - [`Repository`] - the external data-access capability set
//! - [`MessageProcessor`] - payload decoding and response building
//!
//! The pipeline itself lives in `janus-pipeline`; content negotiation in
//! `janus-format`. This crate deliberately has no pipeline logic so that
//! repository implementations depend only on stable vocabulary types.

#![doc(html_root_url = "https://docs.rs/janus-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::future::Future;
use std::pin::Pin;

pub mod error;
pub mod message;
pub mod repository;

/// A boxed future, the async return type of repository and wrapper calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

// Re-export main types at crate root
pub use error::{Error, Result, Translation};
pub use message::{
    JsonMessageProcessor, MessageProcessor, Payload, Request, Response, CONTENT_TYPE_WILDCARD,
};
pub use repository::{Repository, Resource};
