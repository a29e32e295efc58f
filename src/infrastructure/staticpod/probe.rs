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

use crate::domain::config::MasterConfiguration;
use crate::domain::ComponentKind;
use crate::infrastructure::constants::{
    LIVENESS_FAILURE_THRESHOLD, LIVENESS_INITIAL_DELAY, LIVENESS_TIMEOUT,
};
use crate::infrastructure::staticpod::address::{probe_address_with, HostResolver, SystemResolver};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UriScheme {
    #[serde(rename = "HTTP")]
    Http,
    #[serde(rename = "HTTPS")]
    Https,
}

impl UriScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            UriScheme::Http => "HTTP",
            UriScheme::Https => "HTTPS",
        }
    }
}

/// Builds an HTTP GET liveness probe against the component's probe address.
/// Port, path and scheme are taken as given.
pub fn component_probe(
    cfg: &MasterConfiguration,
    component: ComponentKind,
    port: i32,
    path: &str,
    scheme: UriScheme,
) -> Result<Probe> {
    component_probe_with(cfg, component, port, path, scheme, &SystemResolver)
}

pub fn component_probe_with<R: HostResolver + ?Sized>(
    cfg: &MasterConfiguration,
    component: ComponentKind,
    port: i32,
    path: &str,
    scheme: UriScheme,
    resolver: &R,
) -> Result<Probe> {
    let host = probe_address_with(cfg, component, resolver)?;

    Ok(Probe {
        http_get: Some(HTTPGetAction {
            host: Some(host),
            path: Some(path.to_string()),
            port: IntOrString::Int(port),
            scheme: Some(scheme.as_str().to_string()),
            ..Default::default()
        }),
        initial_delay_seconds: Some(LIVENESS_INITIAL_DELAY),
        timeout_seconds: Some(LIVENESS_TIMEOUT),
        failure_threshold: Some(LIVENESS_FAILURE_THRESHOLD),
        ..Default::default()
    })
}
