//! # Janus Pipeline
//!
//! Request-processing pipeline for the Janus REST framework.
//!
//! Every request flows through an ordered chain of [`Wrapper`]s folded
//! around the terminal repository dispatch:
//!
//! ```text
//! Request → SafetyNet → IpFirewall → custom… → AccessorWrapper → Repository
//!                                                                    ↓
//! Response ← SafetyNet ← IpFirewall ← custom… ←──────────────────────┘
//! ```
//!
//! Wrappers are registered into a [`PipelineRegistry`] tagged by
//! [`Priority`]; lower priority values sit further out in the chain. The
//! registries live in a [`FrameworkContext`] built once at boot and passed
//! by reference into request serving; there is no global mutable state.
//!
//! ## Built-in wrappers
//!
//! | Wrapper | Kind | Typical priority |
//! |---------|------|------------------|
//! | [`SafetyNetWrapper`] | fault boundary | `LOW` (outermost) |
//! | [`IpFirewallWrapper`] | IP allow/deny | `LOW`/`NORMAL` |
//! | [`AccessorWrapper`] | verb dispatch | terminal |
//!
//! ## Example
//!
//! ```
//! use janus_pipeline::{FrameworkContext, IpFirewallWrapper, Priority};
//!
//! let mut ctx = FrameworkContext::new();
//! let mut firewall = IpFirewallWrapper::new();
//! firewall.add_to_allow("10.0.0.0/30").unwrap();
//! ctx.register(firewall, Priority::LOW);
//!
//! assert_eq!(ctx.ordered_wrappers().len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/janus-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod pipeline;
pub mod registry;
pub mod wrapper;
pub mod wrappers;

// Re-export main types at crate root
pub use context::FrameworkContext;
pub use pipeline::RequestPipeline;
pub use registry::{PipelineRegistry, Priority};
pub use wrapper::{Next, Verb, Wrapper, WrapperKind};
pub use wrappers::{
    AccessorWrapper, FirewallConfig, FirewallError, IpFirewallWrapper, SafetyNetWrapper,
};
