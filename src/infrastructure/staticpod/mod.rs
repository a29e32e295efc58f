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

//! Static Pod building blocks

pub mod address;
pub mod params;
pub mod pod;
pub mod probe;
pub mod resources;
pub mod volumes;
pub mod writer;

pub use self::address::{probe_address, probe_address_with, HostResolver, SystemResolver};
pub use self::params::get_extra_parameters;
pub use self::pod::component_pod;
pub use self::probe::{component_probe, component_probe_with, UriScheme};
pub use self::resources::component_resources;
pub use self::volumes::{
    new_volume, new_volume_mount, volume_map_to_slice, volume_mount_map_to_slice, HostPathType,
};
pub use self::writer::{manifest_path, write_static_pod_to_disk};
