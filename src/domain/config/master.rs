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

//! Typed control-plane configuration.
//!
//! Every component carries an `extra_args` table of free-form flags. Keys the
//! manifest builders interpret (`address`, `listen-client-urls`) are lifted
//! out of that table into named fields when the configuration is loaded, so
//! the named field is the only place they are read from.

use crate::infrastructure::constants::*;
use crate::shared::error::{Result, StaticPodError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

pub type ExtraArgs = BTreeMap<String, String>;

/// Configuration for a single control-plane node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterConfiguration {
    pub kubernetes_version: String,
    pub image_repository: String,
    pub cert_dir: String,
    pub api: ApiEndpoint,
    pub networking: Networking,
    pub api_server: ApiServerConfig,
    pub controller_manager: ControllerManagerConfig,
    pub scheduler: SchedulerConfig,
    pub etcd: EtcdConfig,
}

impl Default for MasterConfiguration {
    fn default() -> Self {
        Self {
            kubernetes_version: DEFAULT_KUBERNETES_VERSION.to_string(),
            image_repository: DEFAULT_IMAGE_REPOSITORY.to_string(),
            cert_dir: DEFAULT_CERT_DIR.to_string(),
            api: ApiEndpoint::default(),
            networking: Networking::default(),
            api_server: ApiServerConfig::default(),
            controller_manager: ControllerManagerConfig::default(),
            scheduler: SchedulerConfig::default(),
            etcd: EtcdConfig::default(),
        }
    }
}

impl MasterConfiguration {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            StaticPodError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut conf: Self = toml::from_str(content)?;
        conf.lift_well_known_args();
        Ok(conf)
    }

    /// Moves well-known keys out of the `extra_args` tables. A named field that
    /// is already set wins over the table entry.
    pub fn lift_well_known_args(&mut self) {
        lift(
            &mut self.scheduler.extra_args,
            ARG_ADDRESS,
            &mut self.scheduler.address,
        );
        lift(
            &mut self.controller_manager.extra_args,
            ARG_ADDRESS,
            &mut self.controller_manager.address,
        );
        lift(
            &mut self.etcd.extra_args,
            ARG_LISTEN_CLIENT_URLS,
            &mut self.etcd.listen_client_urls,
        );
    }

    /// Image reference for a Kubernetes control-plane binary.
    pub fn component_image(&self, component: &str) -> String {
        format!(
            "{}/{}-{}:{}",
            self.image_repository, component, IMAGE_ARCH, self.kubernetes_version
        )
    }

    pub fn etcd_image(&self) -> String {
        self.etcd.image.clone().unwrap_or_else(|| {
            format!(
                "{}/etcd-{}:{}",
                self.image_repository, IMAGE_ARCH, DEFAULT_ETCD_VERSION
            )
        })
    }
}

fn lift(extra_args: &mut ExtraArgs, key: &str, field: &mut Option<String>) {
    if let Some(value) = extra_args.remove(key) {
        if field.is_none() {
            *field = Some(value);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoint {
    pub advertise_address: Option<String>,
    pub bind_port: i32,
}

impl Default for ApiEndpoint {
    fn default() -> Self {
        Self {
            advertise_address: None,
            bind_port: KUBE_APISERVER_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Networking {
    pub service_subnet: String,
    pub pod_subnet: Option<String>,
    pub dns_domain: String,
}

impl Default for Networking {
    fn default() -> Self {
        Self {
            service_subnet: DEFAULT_SERVICE_SUBNET.to_string(),
            pod_subnet: None,
            dns_domain: DEFAULT_DNS_DOMAIN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiServerConfig {
    pub extra_args: ExtraArgs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerManagerConfig {
    /// Bind address, expected to be a literal IP.
    pub address: Option<String>,
    pub extra_args: ExtraArgs,
}

impl ControllerManagerConfig {
    /// Flag overrides including the named `address` field.
    pub fn overrides(&self) -> ExtraArgs {
        with_named(&self.extra_args, ARG_ADDRESS, self.address.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Bind address, expected to be a literal IP.
    pub address: Option<String>,
    pub extra_args: ExtraArgs,
}

impl SchedulerConfig {
    pub fn overrides(&self) -> ExtraArgs {
        with_named(&self.extra_args, ARG_ADDRESS, self.address.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtcdConfig {
    /// Comma-separated client URLs; the first one is probed.
    pub listen_client_urls: Option<String>,
    pub data_dir: String,
    pub image: Option<String>,
    pub extra_args: ExtraArgs,
}

impl Default for EtcdConfig {
    fn default() -> Self {
        Self {
            listen_client_urls: None,
            data_dir: DEFAULT_ETCD_DATA_DIR.to_string(),
            image: None,
            extra_args: ExtraArgs::new(),
        }
    }
}

impl EtcdConfig {
    pub fn overrides(&self) -> ExtraArgs {
        with_named(
            &self.extra_args,
            ARG_LISTEN_CLIENT_URLS,
            self.listen_client_urls.as_deref(),
        )
    }
}

fn with_named(extra_args: &ExtraArgs, key: &str, value: Option<&str>) -> ExtraArgs {
    let mut args = extra_args.clone();
    if let Some(value) = value {
        args.insert(key.to_string(), value.to_string());
    }
    args
}
