//! Table rendering for CLI output

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};
use k8s_openapi::api::core::v1::Pod;
use std::path::PathBuf;

/// One generated manifest for summary display
#[derive(Debug, Clone)]
pub struct ManifestInfo {
    pub component: String,
    pub image: String,
    pub probe: String,
    pub path: Option<PathBuf>,
}

impl ManifestInfo {
    pub fn from_pod(component: &str, pod: &Pod, path: Option<PathBuf>) -> Self {
        let container = pod.spec.as_ref().and_then(|s| s.containers.first());

        let image = container
            .and_then(|c| c.image.clone())
            .unwrap_or_else(|| "-".to_string());

        let probe = container
            .and_then(|c| c.liveness_probe.as_ref())
            .and_then(|p| p.http_get.as_ref())
            .map(|action| {
                let port = match &action.port {
                    k8s_openapi::apimachinery::pkg::util::intstr::IntOrString::Int(p) => {
                        p.to_string()
                    }
                    k8s_openapi::apimachinery::pkg::util::intstr::IntOrString::String(s) => {
                        s.clone()
                    }
                };
                let host = action.host.as_deref().unwrap_or("");
                let host = if host.contains(':') {
                    format!("[{}]", host)
                } else {
                    host.to_string()
                };
                format!(
                    "{}://{}:{}{}",
                    action.scheme.as_deref().unwrap_or("HTTP").to_lowercase(),
                    host,
                    port,
                    action.path.as_deref().unwrap_or("")
                )
            })
            .unwrap_or_else(|| "-".to_string());

        Self {
            component: component.to_string(),
            image,
            probe,
            path,
        }
    }
}

/// Table renderer for formatted output
#[derive(Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render generated manifests as a formatted table
    pub fn render_manifests(&self, manifests: &[ManifestInfo]) -> String {
        if manifests.is_empty() {
            return "No static Pod manifests generated".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("COMPONENT").set_alignment(CellAlignment::Left),
                Cell::new("IMAGE").set_alignment(CellAlignment::Left),
                Cell::new("LIVENESS PROBE").set_alignment(CellAlignment::Left),
                Cell::new("MANIFEST").set_alignment(CellAlignment::Left),
            ]);

        for manifest in manifests {
            let path = manifest
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string());

            table.add_row(vec![
                Cell::new(&manifest.component).fg(Color::Cyan),
                Cell::new(&manifest.image),
                Cell::new(&manifest.probe),
                Cell::new(path).fg(Color::Green),
            ]);
        }

        format!(
            "{}\n{}",
            format!("✓ {} static Pod manifest(s)", manifests.len())
                .green()
                .bold(),
            table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container, HTTPGetAction, PodSpec, Probe};
    use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

    #[test]
    fn test_render_empty_manifests() {
        let output = TableRenderer::new().render_manifests(&[]);
        assert!(output.contains("No static Pod manifests generated"));
    }

    #[test]
    fn test_render_single_manifest() {
        let pod = Pod {
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: "etcd".to_string(),
                    image: Some("etcd-amd64:3.1.10".to_string()),
                    liveness_probe: Some(Probe {
                        http_get: Some(HTTPGetAction {
                            host: Some("127.0.0.1".to_string()),
                            path: Some("/health".to_string()),
                            port: IntOrString::Int(2379),
                            scheme: Some("HTTP".to_string()),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = ManifestInfo::from_pod("etcd", &pod, Some(PathBuf::from("/tmp/etcd.yaml")));
        assert_eq!(info.probe, "http://127.0.0.1:2379/health");

        let output = TableRenderer::new().render_manifests(&[info]);
        assert!(output.contains("etcd-amd64:3.1.10"));
        assert!(output.contains("/tmp/etcd.yaml"));
    }

    #[test]
    fn test_ipv6_liveness_host_is_bracketed() {
        let pod = Pod {
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: "etcd".to_string(),
                    liveness_probe: Some(Probe {
                        http_get: Some(HTTPGetAction {
                            host: Some("::1".to_string()),
                            path: Some("/health".to_string()),
                            port: IntOrString::Int(2379),
                            scheme: Some("HTTP".to_string()),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        let info = ManifestInfo::from_pod("etcd", &pod, None);
        assert_eq!(info.probe, "http://[::1]:2379/health");
        assert_eq!(info.image, "-");
    }
}
