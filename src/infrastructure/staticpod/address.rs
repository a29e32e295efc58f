// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Liveness-probe host resolution.
//!
//! The host written into a probe is always a literal IP. Hostnames found in
//! the etcd client URLs are resolved here, when the manifest is built, and
//! never by the node agent at probe time.

use crate::domain::config::MasterConfiguration;
use crate::domain::ComponentKind;
use crate::infrastructure::constants::LOOPBACK_ADDRESS;
use crate::shared::error::{Result, StaticPodError};
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use tracing::debug;
use url::{Host, Url};

/// Name lookup used when a probe address is configured as a hostname.
pub trait HostResolver {
    fn lookup_ip(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

/// Blocking lookup through the system resolver. Timeouts are whatever the
/// platform resolver applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn lookup_ip(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        Ok((host, 0u16)
            .to_socket_addrs()?
            .map(|addr| addr.ip())
            .collect())
    }
}

/// Resolves the probe host of `component` using the system resolver.
pub fn probe_address(cfg: &MasterConfiguration, component: ComponentKind) -> Result<String> {
    probe_address_with(cfg, component, &SystemResolver)
}

pub fn probe_address_with<R: HostResolver + ?Sized>(
    cfg: &MasterConfiguration,
    component: ComponentKind,
    resolver: &R,
) -> Result<String> {
    let address = match component {
        ComponentKind::ApiServer => cfg
            .api
            .advertise_address
            .as_deref()
            .filter(|addr| !addr.is_empty())
            .map(str::to_string),
        ComponentKind::ControllerManager => cfg.controller_manager.address.clone(),
        ComponentKind::Scheduler => cfg.scheduler.address.clone(),
        ComponentKind::Etcd => match cfg.etcd.listen_client_urls.as_deref() {
            Some(urls) => etcd_probe_address(urls, resolver)?,
            None => None,
        },
    };

    Ok(address.unwrap_or_else(|| {
        debug!(component = %component, "No probe address configured, using loopback");
        LOOPBACK_ADDRESS.to_string()
    }))
}

/// Probe host for etcd from its `listen-client-urls`. `None` means loopback.
fn etcd_probe_address<R: HostResolver + ?Sized>(
    listen_client_urls: &str,
    resolver: &R,
) -> Result<Option<String>> {
    let first = listen_client_urls.split(',').next().unwrap_or_default();

    let Some(url) = parse_client_url(first) else {
        return Ok(None);
    };

    let hostname = match url.host() {
        Some(Host::Ipv4(ip)) => return Ok(Some(ip.to_string())),
        Some(Host::Ipv6(ip)) => return Ok(Some(ip.to_string())),
        Some(Host::Domain(domain)) if !domain.is_empty() => domain,
        _ => {
            debug!(url = first, "etcd client URL has no host");
            return Ok(None);
        }
    };

    // Opaque hosts of non-special schemes are not parsed as IPs by `url`.
    if let Ok(ip) = hostname.parse::<IpAddr>() {
        return Ok(Some(ip.to_string()));
    }

    let addrs = match resolver.lookup_ip(hostname) {
        Ok(addrs) => addrs,
        Err(e) => {
            debug!(host = hostname, error = %e, "Lookup failed, using loopback");
            return Ok(None);
        }
    };

    match select_address(&addrs) {
        Some(ip) => {
            debug!(host = hostname, ip = %ip, "Resolved etcd probe host");
            Ok(Some(ip.to_string()))
        }
        None => Err(StaticPodError::unresolvable(hostname)),
    }
}

/// Parses one etcd client URL. `Url::parse` silently trims surrounding
/// whitespace, so such entries are rejected here instead.
pub(crate) fn parse_client_url(raw: &str) -> Option<Url> {
    if raw.trim() != raw {
        debug!(url = raw, "etcd client URL has surrounding whitespace");
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            debug!(url = raw, error = %e, "Unparsable etcd client URL");
            None
        }
    }
}

/// First IPv4 address in lookup order, otherwise the first IPv6 one.
/// IPv4-mapped IPv6 addresses count as IPv4.
pub fn select_address(addrs: &[IpAddr]) -> Option<IpAddr> {
    let ipv4 = addrs.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(IpAddr::V4(*v4)),
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4),
    });
    ipv4.or_else(|| addrs.iter().find(|addr| addr.is_ipv6()).copied())
}
