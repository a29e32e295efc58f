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

use crate::domain::ComponentKind;
use crate::infrastructure::constants::MANIFEST_DIR_MODE;
use crate::shared::error::{Result, StaticPodError};
use k8s_openapi::api::core::v1::Pod;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn manifest_path(manifest_dir: &Path, component: ComponentKind) -> PathBuf {
    manifest_dir.join(component.manifest_file_name())
}

/// Serializes the Pod to YAML.
pub fn marshal_pod(pod: &Pod) -> Result<String> {
    Ok(serde_yaml::to_string(pod)?)
}

/// Writes `<manifest_dir>/<component>.yaml`, creating the directory if needed.
pub fn write_static_pod_to_disk(
    component: ComponentKind,
    manifest_dir: &Path,
    pod: &Pod,
) -> Result<PathBuf> {
    create_manifest_dir(manifest_dir)?;

    let content = marshal_pod(pod)?;
    let path = manifest_path(manifest_dir, component);
    fs::write(&path, content).map_err(|e| {
        StaticPodError::config_error(format!(
            "Failed to write static Pod manifest for {} to {}: {}",
            component,
            path.display(),
            e
        ))
    })?;

    info!(component = %component, path = %path.display(), "Wrote static Pod manifest");
    Ok(path)
}

fn create_manifest_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| {
        StaticPodError::config_error(format!(
            "Failed to create manifest directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(MANIFEST_DIR_MODE))?;
    }

    Ok(())
}

/// Reads a manifest back, mainly for verification.
pub fn read_static_pod_from_disk(path: &Path) -> Result<Pod> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::staticpod::pod::component_pod;
    use k8s_openapi::api::core::v1::Container;
    use tempfile::TempDir;

    fn pod(name: &str) -> Pod {
        component_pod(
            Container {
                name: name.to_string(),
                image: Some("example/image:v1".to_string()),
                ..Default::default()
            },
            vec![],
        )
    }

    #[test]
    fn test_write_and_read_back() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("manifests");

        let written = pod("kube-scheduler");
        let path = write_static_pod_to_disk(ComponentKind::Scheduler, &dir, &written).unwrap();

        assert_eq!(path, dir.join("kube-scheduler.yaml"));
        assert_eq!(read_static_pod_from_disk(&path).unwrap(), written);
    }

    #[cfg(unix)]
    #[test]
    fn test_created_directory_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("manifests");
        write_static_pod_to_disk(ComponentKind::Etcd, &dir, &pod("etcd")).unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_marshal_pod_contains_type_meta() {
        let yaml = marshal_pod(&pod("etcd")).unwrap();
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("kind: Pod"));
        assert!(yaml.contains("hostNetwork: true"));
    }

    #[test]
    fn test_write_fails_when_dir_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not-a-dir");
        fs::write(&file, "x").unwrap();

        let result = write_static_pod_to_disk(ComponentKind::Etcd, &file, &pod("etcd"));
        assert!(matches!(result, Err(StaticPodError::ConfigError(_))));
    }
}
