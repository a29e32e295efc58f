// CLI command definitions

use super::staticpod::{GenerateCommand, ProbeCommand, RenderCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kube-staticpod",
    version,
    about = "Control-plane static Pod manifest generator",
    long_about = "Generates static Pod manifests for kube-apiserver, kube-controller-manager, kube-scheduler and etcd"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate static Pod manifests and write them to the manifest directory
    Generate(GenerateCommand),

    /// Print the manifest of one component to stdout
    Render(RenderCommand),

    /// Print the resolved liveness-probe address of one component
    Probe(ProbeCommand),
}
