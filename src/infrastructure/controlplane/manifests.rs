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

use crate::domain::config::{ExtraArgs, MasterConfiguration};
use crate::domain::ComponentKind;
use crate::infrastructure::constants::*;
use crate::infrastructure::controlplane::volumes::ControlPlaneVolumes;
use crate::infrastructure::staticpod::address::parse_client_url;
use crate::infrastructure::staticpod::{
    component_pod, component_probe_with, component_resources, get_extra_parameters,
    HostResolver, SystemResolver, UriScheme,
};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Container, Pod};
use std::collections::BTreeMap;
use tracing::debug;

/// Builds the static Pods of the control plane from one configuration.
pub struct ControlPlaneBuilder<R = SystemResolver> {
    cfg: MasterConfiguration,
    volumes: ControlPlaneVolumes,
    resolver: R,
}

impl ControlPlaneBuilder<SystemResolver> {
    pub fn new(cfg: MasterConfiguration) -> Self {
        Self::with_resolver(cfg, SystemResolver)
    }
}

impl<R: HostResolver> ControlPlaneBuilder<R> {
    pub fn with_resolver(cfg: MasterConfiguration, resolver: R) -> Self {
        let volumes = ControlPlaneVolumes::for_config(&cfg);
        Self {
            cfg,
            volumes,
            resolver,
        }
    }

    pub fn config(&self) -> &MasterConfiguration {
        &self.cfg
    }

    pub fn build_all(&self) -> Result<BTreeMap<ComponentKind, Pod>> {
        ComponentKind::ALL
            .into_iter()
            .map(|component| Ok((component, self.build(component)?)))
            .collect()
    }

    pub fn build(&self, component: ComponentKind) -> Result<Pod> {
        let (port, path, scheme) = self.probe_target(component);
        let probe = component_probe_with(&self.cfg, component, port, path, scheme, &self.resolver)?;

        let resources = match self.cpu_request(component) {
            Some(cpu) => Some(component_resources(cpu)?),
            None => None,
        };

        let container = Container {
            name: component.as_str().to_string(),
            image: Some(self.image(component)),
            command: Some(self.command(component)),
            liveness_probe: Some(probe),
            resources,
            volume_mounts: Some(self.volumes.mounts(component)),
            ..Default::default()
        };

        debug!(component = %component, "Built control-plane container");
        Ok(component_pod(container, self.volumes.volumes(component)))
    }

    /// Full command line: the binary followed by the merged flags.
    pub fn command(&self, component: ComponentKind) -> Vec<String> {
        let (defaults, overrides) = match component {
            ComponentKind::ApiServer => {
                (self.apiserver_defaults(), self.cfg.api_server.extra_args.clone())
            }
            ComponentKind::ControllerManager => (
                self.controller_manager_defaults(),
                self.cfg.controller_manager.overrides(),
            ),
            ComponentKind::Scheduler => (self.scheduler_defaults(), self.cfg.scheduler.overrides()),
            ComponentKind::Etcd => (self.etcd_defaults(), self.cfg.etcd.overrides()),
        };

        let mut flags = get_extra_parameters(&overrides, &defaults);
        flags.sort();

        let mut command = vec![component.as_str().to_string()];
        command.extend(flags);
        command
    }

    fn image(&self, component: ComponentKind) -> String {
        match component {
            ComponentKind::Etcd => self.cfg.etcd_image(),
            _ => self.cfg.component_image(component.as_str()),
        }
    }

    fn cpu_request(&self, component: ComponentKind) -> Option<&'static str> {
        match component {
            ComponentKind::ApiServer => Some(KUBE_APISERVER_CPU),
            ComponentKind::ControllerManager => Some(KUBE_CONTROLLER_MANAGER_CPU),
            ComponentKind::Scheduler => Some(KUBE_SCHEDULER_CPU),
            ComponentKind::Etcd => None,
        }
    }

    fn probe_target(&self, component: ComponentKind) -> (i32, &'static str, UriScheme) {
        match component {
            ComponentKind::ApiServer => (self.cfg.api.bind_port, HEALTHZ_PATH, UriScheme::Https),
            ComponentKind::ControllerManager => {
                (KUBE_CONTROLLER_MANAGER_PORT, HEALTHZ_PATH, UriScheme::Http)
            }
            ComponentKind::Scheduler => (KUBE_SCHEDULER_PORT, HEALTHZ_PATH, UriScheme::Http),
            ComponentKind::Etcd => {
                let (port, scheme) = self.etcd_probe_endpoint();
                (port, ETCD_HEALTH_PATH, scheme)
            }
        }
    }

    /// Port and scheme of the first etcd client URL, if it has them.
    fn etcd_probe_endpoint(&self) -> (i32, UriScheme) {
        let first = self
            .cfg
            .etcd
            .listen_client_urls
            .as_deref()
            .and_then(|urls| urls.split(',').next())
            .and_then(parse_client_url);

        match first {
            Some(url) => {
                let scheme = if url.scheme() == "https" {
                    UriScheme::Https
                } else {
                    UriScheme::Http
                };
                let port = url
                    .port_or_known_default()
                    .map(i32::from)
                    .unwrap_or(ETCD_CLIENT_PORT);
                (port, scheme)
            }
            None => (ETCD_CLIENT_PORT, UriScheme::Http),
        }
    }

    fn apiserver_defaults(&self) -> ExtraArgs {
        let cert = |file: &str| format!("{}/{}", self.cfg.cert_dir, file);
        let mut args = ExtraArgs::new();
        args.insert("insecure-port".into(), "0".into());
        args.insert(
            "admission-control".into(),
            "Initializers,NamespaceLifecycle,LimitRanger,ServiceAccount,DefaultStorageClass,DefaultTolerationSeconds,NodeRestriction,ResourceQuota".into(),
        );
        args.insert(
            "service-cluster-ip-range".into(),
            self.cfg.networking.service_subnet.clone(),
        );
        args.insert("service-account-key-file".into(), cert("sa.pub"));
        args.insert("client-ca-file".into(), cert("ca.crt"));
        args.insert("tls-cert-file".into(), cert("apiserver.crt"));
        args.insert("tls-private-key-file".into(), cert("apiserver.key"));
        args.insert(
            "kubelet-client-certificate".into(),
            cert("apiserver-kubelet-client.crt"),
        );
        args.insert(
            "kubelet-client-key".into(),
            cert("apiserver-kubelet-client.key"),
        );
        args.insert("enable-bootstrap-token-auth".into(), "true".into());
        args.insert("secure-port".into(), self.cfg.api.bind_port.to_string());
        args.insert("allow-privileged".into(), "true".into());
        args.insert(
            "kubelet-preferred-address-types".into(),
            "InternalIP,ExternalIP,Hostname".into(),
        );
        args.insert("authorization-mode".into(), "Node,RBAC".into());
        args.insert(
            "etcd-servers".into(),
            format!("http://{}:{}", LOOPBACK_ADDRESS, ETCD_CLIENT_PORT),
        );
        if let Some(addr) = self
            .cfg
            .api
            .advertise_address
            .as_deref()
            .filter(|a| !a.is_empty())
        {
            args.insert("advertise-address".into(), addr.to_string());
        }
        args
    }

    fn controller_manager_defaults(&self) -> ExtraArgs {
        let cert = |file: &str| format!("{}/{}", self.cfg.cert_dir, file);
        let mut args = ExtraArgs::new();
        args.insert(ARG_ADDRESS.into(), LOOPBACK_ADDRESS.into());
        args.insert("leader-elect".into(), "true".into());
        args.insert(
            "kubeconfig".into(),
            format!("{}/{}", KUBERNETES_DIR, CONTROLLER_MANAGER_KUBECONFIG_FILE),
        );
        args.insert("root-ca-file".into(), cert("ca.crt"));
        args.insert("service-account-private-key-file".into(), cert("sa.key"));
        args.insert("cluster-signing-cert-file".into(), cert("ca.crt"));
        args.insert("cluster-signing-key-file".into(), cert("ca.key"));
        args.insert("use-service-account-credentials".into(), "true".into());
        args.insert(
            "controllers".into(),
            "*,bootstrapsigner,tokencleaner".into(),
        );
        if let Some(pod_subnet) = self.cfg.networking.pod_subnet.as_deref() {
            args.insert("allocate-node-cidrs".into(), "true".into());
            args.insert("cluster-cidr".into(), pod_subnet.to_string());
        }
        args
    }

    fn scheduler_defaults(&self) -> ExtraArgs {
        let mut args = ExtraArgs::new();
        args.insert(ARG_ADDRESS.into(), LOOPBACK_ADDRESS.into());
        args.insert("leader-elect".into(), "true".into());
        args.insert(
            "kubeconfig".into(),
            format!("{}/{}", KUBERNETES_DIR, SCHEDULER_KUBECONFIG_FILE),
        );
        args
    }

    fn etcd_defaults(&self) -> ExtraArgs {
        let client_url = format!("http://{}:{}", LOOPBACK_ADDRESS, ETCD_CLIENT_PORT);
        let mut args = ExtraArgs::new();
        args.insert(ARG_LISTEN_CLIENT_URLS.into(), client_url.clone());
        args.insert("advertise-client-urls".into(), client_url);
        args.insert("data-dir".into(), self.cfg.etcd.data_dir.clone());
        args
    }
}
