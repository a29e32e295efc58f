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

//! Host-path volumes of the control-plane static Pods.
//!
//! Volumes and mounts are kept in two name-keyed maps per component so that a
//! volume and its mount always share the same name.

use crate::domain::config::MasterConfiguration;
use crate::domain::ComponentKind;
use crate::infrastructure::constants::*;
use crate::infrastructure::staticpod::volumes::{
    new_volume, new_volume_mount, volume_map_to_slice, volume_mount_map_to_slice, HostPathType,
};
use k8s_openapi::api::core::v1::{Volume, VolumeMount};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ControlPlaneVolumes {
    volumes: BTreeMap<ComponentKind, BTreeMap<String, Volume>>,
    mounts: BTreeMap<ComponentKind, BTreeMap<String, VolumeMount>>,
}

impl ControlPlaneVolumes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard host paths every control-plane component needs.
    pub fn for_config(cfg: &MasterConfiguration) -> Self {
        let mut v = Self::new();
        let kubeconfig = |file: &str| format!("{}/{}", KUBERNETES_DIR, file);

        for component in [ComponentKind::ApiServer, ComponentKind::ControllerManager] {
            v.add_host_path_mount(
                component,
                VOLUME_NAME_K8S_CERTS,
                &cfg.cert_dir,
                &cfg.cert_dir,
                true,
                Some(HostPathType::DirectoryOrCreate),
            );
            v.add_host_path_mount(
                component,
                VOLUME_NAME_CA_CERTS,
                CA_CERTS_DIR,
                CA_CERTS_DIR,
                true,
                Some(HostPathType::DirectoryOrCreate),
            );
        }

        let cm_kubeconfig = kubeconfig(CONTROLLER_MANAGER_KUBECONFIG_FILE);
        v.add_host_path_mount(
            ComponentKind::ControllerManager,
            VOLUME_NAME_KUBECONFIG,
            &cm_kubeconfig,
            &cm_kubeconfig,
            true,
            Some(HostPathType::FileOrCreate),
        );
        v.add_host_path_mount(
            ComponentKind::ControllerManager,
            VOLUME_NAME_FLEXVOLUME,
            FLEXVOLUME_DIR,
            FLEXVOLUME_DIR,
            false,
            Some(HostPathType::DirectoryOrCreate),
        );

        let scheduler_kubeconfig = kubeconfig(SCHEDULER_KUBECONFIG_FILE);
        v.add_host_path_mount(
            ComponentKind::Scheduler,
            VOLUME_NAME_KUBECONFIG,
            &scheduler_kubeconfig,
            &scheduler_kubeconfig,
            true,
            Some(HostPathType::FileOrCreate),
        );

        v.add_host_path_mount(
            ComponentKind::Etcd,
            VOLUME_NAME_ETCD_DATA,
            &cfg.etcd.data_dir,
            &cfg.etcd.data_dir,
            false,
            Some(HostPathType::DirectoryOrCreate),
        );

        v
    }

    /// Adds a volume and its mount under the same name. A second call with
    /// the same name replaces both.
    pub fn add_host_path_mount(
        &mut self,
        component: ComponentKind,
        name: &str,
        host_path: &str,
        mount_path: &str,
        read_only: bool,
        path_type: Option<HostPathType>,
    ) {
        self.volumes
            .entry(component)
            .or_default()
            .insert(name.to_string(), new_volume(name, host_path, path_type));
        self.mounts
            .entry(component)
            .or_default()
            .insert(name.to_string(), new_volume_mount(name, mount_path, read_only));
    }

    pub fn volumes(&self, component: ComponentKind) -> Vec<Volume> {
        self.volumes
            .get(&component)
            .map(volume_map_to_slice)
            .unwrap_or_default()
    }

    pub fn mounts(&self, component: ComponentKind) -> Vec<VolumeMount> {
        self.mounts
            .get(&component)
            .map(volume_mount_map_to_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(volumes: &[Volume]) -> Vec<&str> {
        volumes.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_volumes_and_mounts_are_aligned() {
        let v = ControlPlaneVolumes::for_config(&MasterConfiguration::default());
        for component in ComponentKind::ALL {
            let volumes = v.volumes(component);
            let mounts = v.mounts(component);
            assert!(!volumes.is_empty(), "{} has no volumes", component);
            let mount_names: Vec<&str> = mounts.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names(&volumes), mount_names);
        }
    }

    #[test]
    fn test_component_volumes() {
        let mut cfg = MasterConfiguration::default();
        cfg.etcd.data_dir = "/data/etcd".to_string();
        let v = ControlPlaneVolumes::for_config(&cfg);

        assert_eq!(
            names(&v.volumes(ComponentKind::ApiServer)),
            vec!["ca-certs", "k8s-certs"]
        );
        assert_eq!(
            names(&v.volumes(ComponentKind::ControllerManager)),
            vec!["ca-certs", "flexvolume-dir", "k8s-certs", "kubeconfig"]
        );
        assert_eq!(names(&v.volumes(ComponentKind::Scheduler)), vec!["kubeconfig"]);

        let etcd = v.volumes(ComponentKind::Etcd);
        let host_path = etcd[0].host_path.as_ref().unwrap();
        assert_eq!(host_path.path, "/data/etcd");
        assert_eq!(host_path.type_.as_deref(), Some("DirectoryOrCreate"));
        assert_eq!(v.mounts(ComponentKind::Etcd)[0].read_only, Some(false));
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut v = ControlPlaneVolumes::new();
        v.add_host_path_mount(ComponentKind::Etcd, "data", "/a", "/a", true, None);
        v.add_host_path_mount(ComponentKind::Etcd, "data", "/b", "/c", false, None);

        let volumes = v.volumes(ComponentKind::Etcd);
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].host_path.as_ref().unwrap().path, "/b");
        assert_eq!(v.mounts(ComponentKind::Etcd)[0].mount_path, "/c");
        assert!(v.volumes(ComponentKind::Scheduler).is_empty());
    }
}
