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

use crate::infrastructure::constants::{
    ANNOTATION_CRITICAL_POD, LABEL_COMPONENT, LABEL_TIER, LABEL_TIER_CONTROL_PLANE,
    SYSTEM_NAMESPACE,
};
use k8s_openapi::api::core::v1::{Container, Pod, PodSpec, Volume};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

pub fn control_plane_labels(component: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_COMPONENT.to_string(), component.to_string());
    labels.insert(LABEL_TIER.to_string(), LABEL_TIER_CONTROL_PLANE.to_string());
    labels
}

/// Wraps a control-plane container into a static Pod.
///
/// The Pod is named after the container, lives in `kube-system`, is marked
/// critical and uses the host network, since overlay networking may not be
/// up while the control plane bootstraps.
pub fn component_pod(container: Container, volumes: Vec<Volume>) -> Pod {
    let mut annotations = BTreeMap::new();
    annotations.insert(ANNOTATION_CRITICAL_POD.to_string(), String::new());

    Pod {
        metadata: ObjectMeta {
            name: Some(container.name.clone()),
            namespace: Some(SYSTEM_NAMESPACE.to_string()),
            labels: Some(control_plane_labels(&container.name)),
            annotations: Some(annotations),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers: vec![container],
            host_network: Some(true),
            volumes: Some(volumes),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::staticpod::volumes::new_volume;
    use k8s_openapi::Resource;

    #[test]
    fn test_component_pod() {
        let container = Container {
            name: "foo".to_string(),
            ..Default::default()
        };

        let expected = Pod {
            metadata: ObjectMeta {
                name: Some("foo".to_string()),
                namespace: Some("kube-system".to_string()),
                annotations: Some(BTreeMap::from([(
                    "scheduler.alpha.kubernetes.io/critical-pod".to_string(),
                    String::new(),
                )])),
                labels: Some(BTreeMap::from([
                    ("component".to_string(), "foo".to_string()),
                    ("tier".to_string(), "control-plane".to_string()),
                ])),
                ..Default::default()
            },
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: "foo".to_string(),
                    ..Default::default()
                }],
                host_network: Some(true),
                volumes: Some(vec![]),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(component_pod(container, vec![]), expected);
        assert_eq!(Pod::API_VERSION, "v1");
        assert_eq!(Pod::KIND, "Pod");
    }

    #[test]
    fn test_component_pod_keeps_volume_order() {
        let volumes = vec![
            new_volume("b", "/b", None),
            new_volume("a", "/a", None),
        ];
        let pod = component_pod(
            Container {
                name: "etcd".to_string(),
                ..Default::default()
            },
            volumes.clone(),
        );
        assert_eq!(pod.spec.unwrap().volumes, Some(volumes));
    }

    #[test]
    fn test_component_pod_serializes_type_meta() {
        let pod = component_pod(
            Container {
                name: "kube-scheduler".to_string(),
                ..Default::default()
            },
            vec![],
        );
        let value = serde_json::to_value(&pod).unwrap();
        assert_eq!(value["apiVersion"], "v1");
        assert_eq!(value["kind"], "Pod");
        assert_eq!(value["spec"]["hostNetwork"], true);
        assert_eq!(value["spec"]["volumes"], serde_json::json!([]));
        assert_eq!(
            value["metadata"]["annotations"]["scheduler.alpha.kubernetes.io/critical-pod"],
            ""
        );
    }
}
