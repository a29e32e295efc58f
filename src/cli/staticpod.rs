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

use crate::cli::display::{ManifestInfo, TableRenderer};
use crate::domain::config::{apply_to_master_config, parse_dynamic_configs, MasterConfiguration};
use crate::domain::ComponentKind;
use crate::infrastructure::constants::DEFAULT_MANIFEST_DIR;
use crate::infrastructure::controlplane::ControlPlaneBuilder;
use crate::infrastructure::staticpod::{probe_address, write_static_pod_to_disk};
use clap::{Args, Parser, ValueEnum};
use futures::future::try_join_all;
use k8s_openapi::api::core::v1::Pod;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const CONFIG_ENV_VAR: &str = "KUBE_STATICPOD_CONFIG";

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the control-plane configuration file (TOML)
    /// If not provided, reads KUBE_STATICPOD_CONFIG or falls back to defaults
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Dynamic configuration properties to override any settings (-D key=value)
    ///
    /// Basic: kubernetes-version, image-repository, cert-dir
    /// API: api.advertise-address, api.bind-port
    /// Networking: networking.service-subnet, networking.pod-subnet, networking.dns-domain
    /// Probe addresses: scheduler.address, controller-manager.address, etcd.listen-client-urls
    /// etcd: etcd.data-dir, etcd.image
    /// Flags: apiserver.extra-args.FLAG, controller-manager.extra-args.FLAG,
    ///        scheduler.extra-args.FLAG, etcd.extra-args.FLAG
    ///
    /// Example: -Detcd.listen-client-urls=http://localhost:2379 -Dscheduler.extra-args.v=2
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

impl ConfigArgs {
    /// Priority: -D properties > config file > defaults
    pub fn load(&self) -> anyhow::Result<MasterConfiguration> {
        let mut conf = if let Some(ref path) = self.config {
            MasterConfiguration::from_file(path)?
        } else if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            MasterConfiguration::from_file(&env_path)?
        } else {
            info!("No configuration file specified, using default settings");
            MasterConfiguration::default()
        };

        if !self.properties.is_empty() {
            let dynamic_configs = parse_dynamic_configs(&self.properties)
                .map_err(|e| anyhow::anyhow!("Failed to parse dynamic configs: {}", e))?;
            apply_to_master_config(&dynamic_configs, &mut conf)?;
        }

        Ok(conf)
    }
}

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory the node agent watches for static Pod manifests
    #[arg(long, default_value = DEFAULT_MANIFEST_DIR)]
    pub manifest_dir: PathBuf,

    /// Components to generate (repeatable); all when omitted
    #[arg(long = "component", short = 'c', value_name = "NAME")]
    pub components: Vec<ComponentKind>,

    /// Build manifests without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = self.config.load()?;
        let components = if self.components.is_empty() {
            ComponentKind::ALL.to_vec()
        } else {
            self.components.clone()
        };

        let pods = build_concurrently(ControlPlaneBuilder::new(conf), &components).await?;

        let mut summary = Vec::with_capacity(pods.len());
        for (component, pod) in &pods {
            let path = if self.dry_run {
                None
            } else {
                Some(write_static_pod_to_disk(*component, &self.manifest_dir, pod)?)
            };
            summary.push(ManifestInfo::from_pod(component.as_str(), pod, path));
        }

        println!("{}", TableRenderer::new().render_manifests(&summary));
        Ok(())
    }
}

/// Builds each component on the blocking pool; only the DNS lookup blocks.
async fn build_concurrently(
    builder: ControlPlaneBuilder,
    components: &[ComponentKind],
) -> anyhow::Result<Vec<(ComponentKind, Pod)>> {
    let builder = Arc::new(builder);
    let tasks = components.iter().map(|&component| {
        let builder = Arc::clone(&builder);
        tokio::task::spawn_blocking(move || builder.build(component).map(|pod| (component, pod)))
    });

    let mut pods = Vec::with_capacity(components.len());
    for result in try_join_all(tasks).await? {
        pods.push(result?);
    }
    Ok(pods)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Parser, Debug)]
pub struct RenderCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Component to render
    #[arg(long, short = 'c', value_name = "NAME")]
    pub component: ComponentKind,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "yaml")]
    pub output: OutputFormat,
}

impl RenderCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = self.config.load()?;
        let component = self.component;
        let pod = tokio::task::spawn_blocking(move || ControlPlaneBuilder::new(conf).build(component))
            .await??;

        let output = match self.output {
            OutputFormat::Yaml => serde_yaml::to_string(&pod)?,
            OutputFormat::Json => serde_json::to_string_pretty(&pod)?,
        };
        println!("{}", output);
        Ok(())
    }
}

#[derive(Parser, Debug)]
pub struct ProbeCommand {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Component whose probe address is resolved
    #[arg(long, short = 'c', value_name = "NAME")]
    pub component: ComponentKind,
}

impl ProbeCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let conf = self.config.load()?;
        let component = self.component;
        let address = tokio::task::spawn_blocking(move || probe_address(&conf, component)).await??;
        println!("{}", address);
        Ok(())
    }
}
