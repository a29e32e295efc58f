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

use crate::domain::config::master::MasterConfiguration;
use crate::infrastructure::constants::{ARG_ADDRESS, ARG_LISTEN_CLIENT_URLS};
use crate::shared::error::{Result, StaticPodError};
use std::collections::HashMap;

const EXTRA_ARGS_INFIX: &str = ".extra-args.";

/// Parses `-D key=value` properties into a map. Later entries win.
pub fn parse_dynamic_configs(configs: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();

    for config in configs {
        let Some((key, value)) = config.split_once('=') else {
            return Err(StaticPodError::config_error(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                config
            )));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(StaticPodError::config_error(format!(
                "Empty key in config: '{}'",
                config
            )));
        }

        map.insert(key.to_string(), value.trim().to_string());
    }

    Ok(map)
}

pub fn apply_to_master_config(
    configs: &HashMap<String, String>,
    conf: &mut MasterConfiguration,
) -> Result<()> {
    for (key, value) in configs {
        match key.as_str() {
            "kubernetes-version" => conf.kubernetes_version = value.clone(),
            "image-repository" => conf.image_repository = value.clone(),
            "cert-dir" => conf.cert_dir = value.clone(),
            "api.advertise-address" => conf.api.advertise_address = non_empty(value),
            "api.bind-port" => {
                conf.api.bind_port = value.parse::<i32>().map_err(|_| {
                    StaticPodError::config_error(format!("Invalid api.bind-port: '{}'", value))
                })?;
            }
            "networking.service-subnet" => conf.networking.service_subnet = value.clone(),
            "networking.pod-subnet" => conf.networking.pod_subnet = non_empty(value),
            "networking.dns-domain" => conf.networking.dns_domain = value.clone(),
            "scheduler.address" => conf.scheduler.address = non_empty(value),
            "controller-manager.address" => conf.controller_manager.address = non_empty(value),
            "etcd.listen-client-urls" => conf.etcd.listen_client_urls = non_empty(value),
            "etcd.data-dir" => conf.etcd.data_dir = value.clone(),
            "etcd.image" => conf.etcd.image = non_empty(value),
            _ => apply_extra_arg(key, value, conf)?,
        }
    }

    Ok(())
}

fn apply_extra_arg(key: &str, value: &str, conf: &mut MasterConfiguration) -> Result<()> {
    let Some((component, flag)) = key.split_once(EXTRA_ARGS_INFIX) else {
        return Err(StaticPodError::config_error(format!(
            "Unknown config property: '{}'",
            key
        )));
    };

    if flag.is_empty() {
        return Err(StaticPodError::config_error(format!(
            "Missing flag name in config property: '{}'",
            key
        )));
    }

    // Well-known flags go to their named field so they replace the file value.
    match (component, flag) {
        ("controller-manager", ARG_ADDRESS) => {
            conf.controller_manager.address = non_empty(value);
            return Ok(());
        }
        ("scheduler", ARG_ADDRESS) => {
            conf.scheduler.address = non_empty(value);
            return Ok(());
        }
        ("etcd", ARG_LISTEN_CLIENT_URLS) => {
            conf.etcd.listen_client_urls = non_empty(value);
            return Ok(());
        }
        _ => {}
    }

    let extra_args = match component {
        "apiserver" => &mut conf.api_server.extra_args,
        "controller-manager" => &mut conf.controller_manager.extra_args,
        "scheduler" => &mut conf.scheduler.extra_args,
        "etcd" => &mut conf.etcd.extra_args,
        _ => {
            return Err(StaticPodError::config_error(format!(
                "Unknown component in config property: '{}'",
                key
            )))
        }
    };
    extra_args.insert(flag.to_string(), value.to_string());
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
