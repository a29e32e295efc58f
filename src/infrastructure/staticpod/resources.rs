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

use crate::shared::error::{Result, StaticPodError};
use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use std::collections::BTreeMap;

pub const RESOURCE_CPU: &str = "cpu";

/// Kubernetes quantity grammar: a signed decimal number followed by an
/// optional binary-SI, decimal-SI or decimal exponent suffix.
const QUANTITY_PATTERN: &str =
    r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[KMGTPE]i|[mkMGTPE]|[eE][+-]?[0-9]+)?$";

/// Builds the resource requirements of a control-plane container from a CPU
/// request such as `250m`.
///
/// `requests` is always present. An empty quantity yields an empty request
/// map, a malformed one is rejected.
pub fn component_resources(cpu: &str) -> Result<ResourceRequirements> {
    let mut requests = BTreeMap::new();
    if !cpu.is_empty() {
        requests.insert(RESOURCE_CPU.to_string(), parse_quantity(cpu)?);
    }

    Ok(ResourceRequirements {
        requests: Some(requests),
        ..Default::default()
    })
}

pub fn parse_quantity(s: &str) -> Result<Quantity> {
    let re = Regex::new(QUANTITY_PATTERN).map_err(|e| {
        StaticPodError::config_error(format!("Invalid quantity pattern: {}", e))
    })?;
    if !re.is_match(s) {
        return Err(StaticPodError::InvalidQuantity(s.to_string()));
    }
    Ok(Quantity(s.to_string()))
}
