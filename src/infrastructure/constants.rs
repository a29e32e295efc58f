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

/// Static Pod identity
pub const POD_API_VERSION: &str = "v1";
pub const POD_KIND: &str = "Pod";
pub const SYSTEM_NAMESPACE: &str = "kube-system";

/// Resource labels
pub const LABEL_COMPONENT: &str = "component";
pub const LABEL_TIER: &str = "tier";
pub const LABEL_TIER_CONTROL_PLANE: &str = "control-plane";

/// Marks the Pod as must-not-evict for the node agent
pub const ANNOTATION_CRITICAL_POD: &str = "scheduler.alpha.kubernetes.io/critical-pod";

/// Network configuration
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// Component names
pub const KUBE_APISERVER: &str = "kube-apiserver";
pub const KUBE_CONTROLLER_MANAGER: &str = "kube-controller-manager";
pub const KUBE_SCHEDULER: &str = "kube-scheduler";
pub const ETCD: &str = "etcd";

/// Well-known extra argument keys
pub const ARG_ADDRESS: &str = "address";
pub const ARG_LISTEN_CLIENT_URLS: &str = "listen-client-urls";

/// Component ports
pub const KUBE_APISERVER_PORT: i32 = 6443;
pub const KUBE_SCHEDULER_PORT: i32 = 10251;
pub const KUBE_CONTROLLER_MANAGER_PORT: i32 = 10252;
pub const ETCD_CLIENT_PORT: i32 = 2379;

/// Health check configuration
pub const HEALTHZ_PATH: &str = "/healthz";
pub const ETCD_HEALTH_PATH: &str = "/health";
pub const LIVENESS_INITIAL_DELAY: i32 = 15;
pub const LIVENESS_TIMEOUT: i32 = 15;
pub const LIVENESS_FAILURE_THRESHOLD: i32 = 8;

/// Default CPU requests
pub const KUBE_APISERVER_CPU: &str = "250m";
pub const KUBE_CONTROLLER_MANAGER_CPU: &str = "200m";
pub const KUBE_SCHEDULER_CPU: &str = "100m";

/// Host paths
pub const KUBERNETES_DIR: &str = "/etc/kubernetes";
pub const DEFAULT_MANIFEST_DIR: &str = "/etc/kubernetes/manifests";
pub const DEFAULT_CERT_DIR: &str = "/etc/kubernetes/pki";
pub const DEFAULT_ETCD_DATA_DIR: &str = "/var/lib/etcd";
pub const CA_CERTS_DIR: &str = "/etc/ssl/certs";
pub const FLEXVOLUME_DIR: &str = "/usr/libexec/kubernetes/kubelet-plugins/volume/exec";
pub const SCHEDULER_KUBECONFIG_FILE: &str = "scheduler.conf";
pub const CONTROLLER_MANAGER_KUBECONFIG_FILE: &str = "controller-manager.conf";

/// Volume and VolumeMount names
pub const VOLUME_NAME_K8S_CERTS: &str = "k8s-certs";
pub const VOLUME_NAME_CA_CERTS: &str = "ca-certs";
pub const VOLUME_NAME_KUBECONFIG: &str = "kubeconfig";
pub const VOLUME_NAME_FLEXVOLUME: &str = "flexvolume-dir";
pub const VOLUME_NAME_ETCD_DATA: &str = "etcd";

/// Images
pub const DEFAULT_IMAGE_REPOSITORY: &str = "gcr.io/google_containers";
pub const DEFAULT_KUBERNETES_VERSION: &str = "v1.9.0";
pub const DEFAULT_ETCD_VERSION: &str = "3.1.10";
pub const IMAGE_ARCH: &str = "amd64";

/// Networking defaults
pub const DEFAULT_SERVICE_SUBNET: &str = "10.96.0.0/12";
pub const DEFAULT_DNS_DOMAIN: &str = "cluster.local";

/// Manifest file permissions
pub const MANIFEST_DIR_MODE: u32 = 0o700;
