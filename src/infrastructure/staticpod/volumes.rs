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

use k8s_openapi::api::core::v1::{HostPathVolumeSource, Volume, VolumeMount};
use std::collections::BTreeMap;

/// Check the node agent performs on a host path before mounting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPathType {
    DirectoryOrCreate,
    Directory,
    FileOrCreate,
    File,
    Socket,
}

impl HostPathType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostPathType::DirectoryOrCreate => "DirectoryOrCreate",
            HostPathType::Directory => "Directory",
            HostPathType::FileOrCreate => "FileOrCreate",
            HostPathType::File => "File",
            HostPathType::Socket => "Socket",
        }
    }
}

pub fn new_volume(name: &str, path: &str, path_type: Option<HostPathType>) -> Volume {
    Volume {
        name: name.to_string(),
        host_path: Some(HostPathVolumeSource {
            path: path.to_string(),
            type_: path_type.map(|t| t.as_str().to_string()),
        }),
        ..Default::default()
    }
}

pub fn new_volume_mount(name: &str, path: &str, read_only: bool) -> VolumeMount {
    VolumeMount {
        name: name.to_string(),
        mount_path: path.to_string(),
        read_only: Some(read_only),
        ..Default::default()
    }
}

/// Volumes of a name-keyed map, sorted by name.
pub fn volume_map_to_slice(volumes: &BTreeMap<String, Volume>) -> Vec<Volume> {
    volumes.values().cloned().collect()
}

pub fn volume_mount_map_to_slice(mounts: &BTreeMap<String, VolumeMount>) -> Vec<VolumeMount> {
    mounts.values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_volume() {
        let volume = new_volume("foo", "/etc/foo", Some(HostPathType::DirectoryOrCreate));
        assert_eq!(
            volume,
            Volume {
                name: "foo".to_string(),
                host_path: Some(HostPathVolumeSource {
                    path: "/etc/foo".to_string(),
                    type_: Some("DirectoryOrCreate".to_string()),
                }),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_new_volume_without_type() {
        let volume = new_volume("foo", "/etc/foo", None);
        assert_eq!(volume.host_path.unwrap().type_, None);
    }

    #[test]
    fn test_new_volume_mount() {
        let cases = [("foo", "/etc/foo", false), ("bar", "/etc/foo/bar", true)];
        for (name, path, read_only) in cases {
            assert_eq!(
                new_volume_mount(name, path, read_only),
                VolumeMount {
                    name: name.to_string(),
                    mount_path: path.to_string(),
                    read_only: Some(read_only),
                    ..Default::default()
                }
            );
        }
    }

    #[test]
    fn test_map_to_slice_is_sorted_by_name() {
        let mut volumes = BTreeMap::new();
        let mut mounts = BTreeMap::new();
        for name in ["k8s-certs", "ca-certs", "kubeconfig"] {
            volumes.insert(name.to_string(), new_volume(name, "/tmp", None));
            mounts.insert(name.to_string(), new_volume_mount(name, "/tmp", true));
        }

        let names: Vec<_> = volume_map_to_slice(&volumes)
            .into_iter()
            .map(|v| v.name)
            .collect();
        assert_eq!(names, vec!["ca-certs", "k8s-certs", "kubeconfig"]);

        let mount_names: Vec<_> = volume_mount_map_to_slice(&mounts)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(mount_names, names);
    }
}
