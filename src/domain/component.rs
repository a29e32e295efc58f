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
    ETCD, KUBE_APISERVER, KUBE_CONTROLLER_MANAGER, KUBE_SCHEDULER,
};
use crate::shared::error::StaticPodError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Control-plane components that run as static Pods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    #[serde(rename = "kube-apiserver")]
    ApiServer,
    #[serde(rename = "kube-controller-manager")]
    ControllerManager,
    #[serde(rename = "kube-scheduler")]
    Scheduler,
    #[serde(rename = "etcd")]
    Etcd,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::ApiServer,
        ComponentKind::ControllerManager,
        ComponentKind::Scheduler,
        ComponentKind::Etcd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::ApiServer => KUBE_APISERVER,
            ComponentKind::ControllerManager => KUBE_CONTROLLER_MANAGER,
            ComponentKind::Scheduler => KUBE_SCHEDULER,
            ComponentKind::Etcd => ETCD,
        }
    }

    /// Manifest file name under the manifest directory.
    pub fn manifest_file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = StaticPodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kube-apiserver" | "apiserver" => Ok(ComponentKind::ApiServer),
            "kube-controller-manager" | "controller-manager" => {
                Ok(ComponentKind::ControllerManager)
            }
            "kube-scheduler" | "scheduler" => Ok(ComponentKind::Scheduler),
            "etcd" => Ok(ComponentKind::Etcd),
            _ => Err(StaticPodError::UnknownComponent(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names() {
        assert_eq!(ComponentKind::ApiServer.as_str(), "kube-apiserver");
        assert_eq!(ComponentKind::Etcd.to_string(), "etcd");
        assert_eq!(
            ComponentKind::Scheduler.manifest_file_name(),
            "kube-scheduler.yaml"
        );
    }

    #[test]
    fn test_parse_component() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>().unwrap(), kind);
        }
        assert_eq!(
            "scheduler".parse::<ComponentKind>().unwrap(),
            ComponentKind::Scheduler
        );
        assert!(matches!(
            "kube-proxy".parse::<ComponentKind>(),
            Err(StaticPodError::UnknownComponent(_))
        ));
    }
}
