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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::config::{
    ApiEndpoint, ApiServerConfig, ControllerManagerConfig, EtcdConfig, ExtraArgs,
    MasterConfiguration, Networking, SchedulerConfig,
};
pub use domain::ComponentKind;
pub use infrastructure::controlplane::{ControlPlaneBuilder, ControlPlaneVolumes};
pub use infrastructure::staticpod::{
    component_pod, component_probe, component_probe_with, component_resources,
    get_extra_parameters, new_volume, new_volume_mount, probe_address, probe_address_with,
    volume_map_to_slice, volume_mount_map_to_slice, write_static_pod_to_disk, HostPathType,
    HostResolver, SystemResolver, UriScheme,
};
pub use shared::{Result, StaticPodError};
