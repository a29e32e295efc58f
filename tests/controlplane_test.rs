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

use kube_staticpod::domain::config::{apply_to_master_config, parse_dynamic_configs};
use kube_staticpod::infrastructure::staticpod::writer::read_static_pod_from_disk;
use kube_staticpod::*;
use std::io;
use std::net::IpAddr;
use tempfile::TempDir;

mod test_utils {
    use super::*;

    pub struct FixedResolver(pub Vec<IpAddr>);

    impl HostResolver for FixedResolver {
        fn lookup_ip(&self, _host: &str) -> io::Result<Vec<IpAddr>> {
            Ok(self.0.clone())
        }
    }

    pub fn create_test_config() -> MasterConfiguration {
        MasterConfiguration::from_toml_str(
            r#"
kubernetes_version = "v1.9.2"
cert_dir = "/etc/kubernetes/pki"

[api]
advertise_address = "192.168.0.10"
bind_port = 6443

[networking]
pod_subnet = "10.244.0.0/16"

[api_server.extra_args]
admission-control = "NamespaceLifecycle,LimitRanger"

[controller_manager.extra_args]
address = "192.168.0.10"

[etcd]
listen_client_urls = "http://etcd-0.local:2379"
data_dir = "/data/etcd"
"#,
        )
        .unwrap()
    }
}

#[test]
fn test_generate_and_write_all_manifests() {
    let temp = TempDir::new().unwrap();
    let resolver = test_utils::FixedResolver(vec!["fd00::5".parse().unwrap(), "10.0.0.5".parse().unwrap()]);
    let builder = ControlPlaneBuilder::with_resolver(test_utils::create_test_config(), resolver);

    let pods = builder.build_all().unwrap();
    for (component, pod) in &pods {
        let path = write_static_pod_to_disk(*component, temp.path(), pod).unwrap();
        assert_eq!(path, temp.path().join(format!("{}.yaml", component)));
        assert_eq!(&read_static_pod_from_disk(&path).unwrap(), pod);
    }

    let host_of = |component: ComponentKind| {
        pods[&component].spec.as_ref().unwrap().containers[0]
            .liveness_probe
            .as_ref()
            .unwrap()
            .http_get
            .as_ref()
            .unwrap()
            .host
            .clone()
            .unwrap()
    };
    assert_eq!(host_of(ComponentKind::ApiServer), "192.168.0.10");
    assert_eq!(host_of(ComponentKind::ControllerManager), "192.168.0.10");
    assert_eq!(host_of(ComponentKind::Scheduler), "127.0.0.1");
    assert_eq!(host_of(ComponentKind::Etcd), "10.0.0.5");
}

#[test]
fn test_apiserver_command_merges_overrides() {
    let builder = ControlPlaneBuilder::with_resolver(
        test_utils::create_test_config(),
        test_utils::FixedResolver(vec![]),
    );
    let command = builder.command(ComponentKind::ApiServer);

    assert_eq!(command[0], "kube-apiserver");
    assert!(command.contains(&"--admission-control=NamespaceLifecycle,LimitRanger".to_string()));
    assert!(command.contains(&"--advertise-address=192.168.0.10".to_string()));
    assert!(command.contains(&"--secure-port=6443".to_string()));
    assert_eq!(
        command
            .iter()
            .filter(|f| f.starts_with("--admission-control="))
            .count(),
        1
    );
}

#[test]
fn test_unresolvable_etcd_host_is_reported() {
    let builder = ControlPlaneBuilder::with_resolver(
        test_utils::create_test_config(),
        test_utils::FixedResolver(vec![]),
    );
    let err = builder.build(ComponentKind::Etcd).unwrap_err();
    assert!(matches!(err, StaticPodError::UnresolvableHost { .. }));
    assert!(err.to_string().contains("etcd-0.local"));
}

#[test]
fn test_dynamic_properties_override_file() {
    let mut conf = test_utils::create_test_config();
    let props = vec![
        "api.advertise-address=".to_string(),
        "etcd.listen-client-urls=http://1.2.3.4:2379".to_string(),
        "scheduler.extra-args.address=10.1.1.1".to_string(),
    ];
    apply_to_master_config(&parse_dynamic_configs(&props).unwrap(), &mut conf).unwrap();

    assert_eq!(
        probe_address(&conf, ComponentKind::ApiServer).unwrap(),
        "127.0.0.1"
    );
    assert_eq!(probe_address(&conf, ComponentKind::Etcd).unwrap(), "1.2.3.4");
    assert_eq!(
        probe_address(&conf, ComponentKind::Scheduler).unwrap(),
        "10.1.1.1"
    );
}

#[test]
fn test_extra_arg_property_replaces_file_address() {
    let mut conf = MasterConfiguration::from_toml_str(
        r#"
[scheduler]
address = "1.1.1.1"
"#,
    )
    .unwrap();
    let props = vec!["scheduler.extra-args.address=2.2.2.2".to_string()];
    apply_to_master_config(&parse_dynamic_configs(&props).unwrap(), &mut conf).unwrap();

    let builder = ControlPlaneBuilder::with_resolver(conf, test_utils::FixedResolver(vec![]));
    let pod = builder.build(ComponentKind::Scheduler).unwrap();
    let container = &pod.spec.as_ref().unwrap().containers[0];
    let probe = container.liveness_probe.as_ref().unwrap().http_get.as_ref().unwrap();
    assert_eq!(probe.host.as_deref(), Some("2.2.2.2"));

    let command = container.command.as_ref().unwrap();
    assert!(command.contains(&"--address=2.2.2.2".to_string()));
    assert!(!command.contains(&"--address=1.1.1.1".to_string()));
}

#[test]
fn test_config_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("master.toml");
    std::fs::write(&path, "[scheduler]\naddress = \"1.2.3.4\"\n").unwrap();

    let conf = MasterConfiguration::from_file(&path).unwrap();
    assert_eq!(conf.scheduler.address.as_deref(), Some("1.2.3.4"));

    let missing = MasterConfiguration::from_file(temp.path().join("missing.toml"));
    assert!(matches!(missing, Err(StaticPodError::ConfigError(_))));
}
