//! IP allow/deny access control.
//!
//! [`IpFirewallWrapper`] guards the dispatch path with a mutually exclusive
//! allow-list or deny-list of IPv4 addresses. Entries are single addresses or
//! CIDR blocks, expanded eagerly at configuration time into their concrete
//! member addresses; the request-time check is an exact membership test
//! against the caller's address.
//!
//! Configuration failures ([`FirewallError`]) are boot-time-fatal and never
//! occur while serving: a misconfigured firewall is a process that should not
//! have started.

use crate::context::FrameworkContext;
use crate::wrapper::{Next, Verb, Wrapper, WrapperKind};
use janus_core::{BoxFuture, Error, Request, Response, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error as ThisError;

/// Configuration-time firewall errors. Fatal to boot, never raised while
/// serving requests.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum FirewallError {
    /// The textual form is neither a well-formed dotted-quad address nor a
    /// well-formed CIDR block.
    #[error("invalid address spec '{spec}'")]
    InvalidAddressSpec {
        /// The offending input.
        spec: String,
    },

    /// The other list already holds entries; a firewall instance commits to
    /// exactly one policy mode for its lifetime.
    #[error("conflicting access policy: allow and deny lists are mutually exclusive")]
    ConflictingAccessPolicy,
}

/// Expands an address spec into the concrete set of member addresses.
///
/// `spec` is either a bare IPv4 dotted quad (a one-element set) or CIDR
/// notation `address/prefix`. CIDR blocks expand to every address they
/// cover, network and broadcast addresses included: a `/30` yields all 4
/// addresses of the block.
///
/// Expansion is eager, so this is meant for host-scale blocks; a `/8` will
/// happily allocate sixteen million entries.
pub fn expand(spec: &str) -> std::result::Result<BTreeSet<Ipv4Addr>, FirewallError> {
    let invalid = || FirewallError::InvalidAddressSpec {
        spec: spec.to_string(),
    };

    match spec.split_once('/') {
        None => {
            let addr: Ipv4Addr = spec.parse().map_err(|_| invalid())?;
            Ok(BTreeSet::from([addr]))
        }
        Some((addr, prefix)) => {
            let addr: Ipv4Addr = addr.parse().map_err(|_| invalid())?;
            let prefix: u32 = prefix.parse().map_err(|_| invalid())?;
            if prefix > 32 {
                return Err(invalid());
            }

            let mask = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - prefix)
            };
            let network = u32::from(addr) & mask;
            let broadcast = network | !mask;

            Ok((network..=broadcast).map(Ipv4Addr::from).collect())
        }
    }
}

/// Declarative firewall configuration, one list per policy mode.
///
/// Populating both lists is rejected when the config is applied, exactly as
/// with the imperative [`IpFirewallWrapper::add_to_allow`] /
/// [`IpFirewallWrapper::add_to_deny`] calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FirewallConfig {
    /// Address specs admitted by an allow-list firewall.
    #[serde(default)]
    pub allow: Vec<String>,
    /// Address specs rejected by a deny-list firewall.
    #[serde(default)]
    pub deny: Vec<String>,
}

/// Wrapper enforcing a mutually exclusive IP allow/deny policy.
///
/// With a non-empty allow list, only member addresses pass. Otherwise, with
/// a non-empty deny list, member addresses are rejected. With both lists
/// empty every request passes. The check is a pre-condition on normal
/// dispatch only; the generic error path is forwarded untouched.
#[derive(Debug, Clone, Default)]
pub struct IpFirewallWrapper {
    allow: BTreeSet<Ipv4Addr>,
    deny: BTreeSet<Ipv4Addr>,
}

impl IpFirewallWrapper {
    /// Creates a firewall with both lists empty (all requests pass).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a firewall from declarative configuration.
    pub fn from_config(config: &FirewallConfig) -> std::result::Result<Self, FirewallError> {
        let mut firewall = Self::new();
        for spec in &config.allow {
            firewall.add_to_allow(spec)?;
        }
        for spec in &config.deny {
            firewall.add_to_deny(spec)?;
        }
        Ok(firewall)
    }

    /// Expands `spec` and unions it into the allow list.
    pub fn add_to_allow(&mut self, spec: &str) -> std::result::Result<(), FirewallError> {
        if !self.deny.is_empty() {
            return Err(FirewallError::ConflictingAccessPolicy);
        }
        self.allow.extend(expand(spec)?);
        Ok(())
    }

    /// Expands `spec` and unions it into the deny list.
    pub fn add_to_deny(&mut self, spec: &str) -> std::result::Result<(), FirewallError> {
        if !self.allow.is_empty() {
            return Err(FirewallError::ConflictingAccessPolicy);
        }
        self.deny.extend(expand(spec)?);
        Ok(())
    }

    /// Returns the expanded allow list.
    #[must_use]
    pub fn allow_list(&self) -> &BTreeSet<Ipv4Addr> {
        &self.allow
    }

    /// Returns the expanded deny list.
    #[must_use]
    pub fn deny_list(&self) -> &BTreeSet<Ipv4Addr> {
        &self.deny
    }

    fn check(&self, request: &Request) -> Result<()> {
        let addr = match request.client_addr() {
            Some(IpAddr::V4(v4)) => Some(v4),
            // The lists hold IPv4 members only; a v6 caller can never match.
            Some(IpAddr::V6(_)) | None => None,
        };

        if !self.allow.is_empty() {
            if addr.is_some_and(|a| self.allow.contains(&a)) {
                return Ok(());
            }
            tracing::warn!(addr = ?request.client_addr(), "caller not in allow list");
            return Err(Error::forbidden("address not allowed"));
        }

        if !self.deny.is_empty() {
            if let Some(a) = addr {
                if self.deny.contains(&a) {
                    tracing::warn!(addr = %a, "caller in deny list");
                    return Err(Error::forbidden("address denied"));
                }
            }
        }

        Ok(())
    }
}

impl Wrapper for IpFirewallWrapper {
    fn kind(&self) -> WrapperKind {
        WrapperKind::IpFirewall
    }

    fn process<'a>(
        &'a self,
        ctx: &'a FrameworkContext,
        _verb: Verb,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<Response>> {
        Box::pin(async move {
            self.check(&request)?;
            next.run(ctx, request).await
        })
    }
}
