//! Backends command - list the transport backends compiled into this build.

use clap::Args;
use ngrpc_codegen::{BackendDescriptor, backends};
use serde::Serialize;

#[derive(Args, Debug, Clone, Default)]
pub struct BackendsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct BackendInfo {
    pub name: &'static str,
    pub descriptor: &'static BackendDescriptor,
}

pub fn list() -> Vec<BackendInfo> {
    backends()
        .into_iter()
        .map(|backend| BackendInfo {
            name: backend.name(),
            descriptor: backend.descriptor(),
        })
        .collect()
}

pub fn run(args: BackendsArgs) -> anyhow::Result<()> {
    let backends = list();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&backends)?);
        return Ok(());
    }
    for backend in &backends {
        let d = backend.descriptor;
        println!("{:<16} import {} from '{}'", backend.name, d.import_binding, d.import_module);
        println!("{:<16} services: <file>{}, status: {}", "", d.service_file_suffix, d.status_code_namespace);
    }
    Ok(())
}
