//! Built-in pipeline wrappers.
//!
//! - [`IpFirewallWrapper`] - CIDR-based allow/deny access control
//! - [`SafetyNetWrapper`] - outermost fault boundary
//! - [`AccessorWrapper`] - verb-to-repository adapter (terminal-adjacent)

pub mod accessor;
pub mod ip_firewall;
pub mod safety_net;

pub use accessor::AccessorWrapper;
pub use ip_firewall::{expand, FirewallConfig, FirewallError, IpFirewallWrapper};
pub use safety_net::SafetyNetWrapper;
