//! Generate command - Angular services from a compiled descriptor set.

use crate::config::NgrpcConfig;
use crate::descriptor::files_from_descriptors;
use anyhow::Context;
use clap::Args;
use ngrpc_codegen::options::parse_parameter;
use ngrpc_codegen::{GeneratedFile, Generator, OptionSet};
use prost::Message;
use prost_types::FileDescriptorSet;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Generate command arguments
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// FileDescriptorSet produced by `protoc --include_imports --descriptor_set_out`
    pub descriptor_set: PathBuf,

    /// Proto file to generate (repeatable); defaults to every file in the set
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    /// Generator options, e.g. `backend=google,message-import-prefix=app/proto`
    #[arg(short, long)]
    pub parameter: Option<String>,

    /// Config file (defaults to ./ngrpc.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// List the files that would be written without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the generated file list as JSON
    #[arg(long)]
    pub json: bool,
}

/// One entry of the generated file list.
#[derive(Debug, Serialize)]
struct Entry<'a> {
    path: &'a str,
    bytes: usize,
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let files = generate(&args, &cwd)?;

    if !args.dry_run {
        write_outputs(&files, &args.out_dir)?;
    }

    if args.json {
        let entries: Vec<Entry<'_>> = files
            .iter()
            .map(|f| Entry {
                path: &f.name,
                bytes: f.content.len(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for file in &files {
            println!("{}", args.out_dir.join(&file.name).display());
        }
    }
    Ok(())
}

/// Resolve options, read the descriptor set and generate in memory.
pub fn generate(args: &GenerateArgs, cwd: &Path) -> anyhow::Result<Vec<GeneratedFile>> {
    let config = NgrpcConfig::discover(args.config.as_deref(), cwd)?;
    let mut pairs = config.to_pairs();
    if let Some(parameter) = &args.parameter {
        pairs.extend(parse_parameter(parameter));
    }
    let options = OptionSet::from_pairs(pairs)?;
    let generator = Generator::new(options)?;

    let bytes = std::fs::read(&args.descriptor_set)
        .with_context(|| format!("failed to read {}", args.descriptor_set.display()))?;
    let set = FileDescriptorSet::decode(bytes.as_slice())
        .with_context(|| format!("{} is not a FileDescriptorSet", args.descriptor_set.display()))?;

    let requested: Vec<String> = if args.files.is_empty() {
        set.file.iter().map(|f| f.name().to_string()).collect()
    } else {
        args.files.clone()
    };
    let definitions = files_from_descriptors(&set.file, &requested)?;
    Ok(generator.generate_all(&definitions)?)
}

/// Write every file under `out_dir`, creating directories as needed.
pub fn write_outputs(files: &[GeneratedFile], out_dir: &Path) -> anyhow::Result<()> {
    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote file");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};
    use tempfile::TempDir;

    fn sample_set() -> FileDescriptorSet {
        let messages = FileDescriptorProto {
            name: Some("greet/messages.proto".to_string()),
            package: Some("greet".to_string()),
            message_type: vec![
                DescriptorProto {
                    name: Some("Ping".to_string()),
                    ..Default::default()
                },
                DescriptorProto {
                    name: Some("Pong".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let service = FileDescriptorProto {
            name: Some("greet/pinger.proto".to_string()),
            package: Some("greet".to_string()),
            dependency: vec!["greet/messages.proto".to_string()],
            service: vec![ServiceDescriptorProto {
                name: Some("Pinger".to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some("Ping".to_string()),
                    input_type: Some(".greet.Ping".to_string()),
                    output_type: Some(".greet.Pong".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        FileDescriptorSet {
            file: vec![messages, service],
        }
    }

    fn args(dir: &TempDir, parameter: Option<&str>) -> GenerateArgs {
        let descriptor_set = dir.path().join("set.pb");
        std::fs::write(&descriptor_set, sample_set().encode_to_vec()).unwrap();
        GenerateArgs {
            descriptor_set,
            files: Vec::new(),
            parameter: parameter.map(str::to_string),
            config: None,
            out_dir: dir.path().join("out"),
            dry_run: false,
            json: false,
        }
    }

    #[test]
    fn generates_from_descriptor_set() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir, Some("backend=google,message-import-prefix=app,service-import-prefix=app,index"));
        let files = generate(&args, dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["greet/pinger_ng_grpc_pb.ts", "greet/index.ts"]);
        assert!(files[0].content.contains("} from 'app/greet/messages_pb';"));

        write_outputs(&files, &args.out_dir).unwrap();
        let written = std::fs::read_to_string(args.out_dir.join("greet/pinger_ng_grpc_pb.ts")).unwrap();
        assert_eq!(written, files[0].content);
        assert!(args.out_dir.join("greet/index.ts").is_file());
    }

    #[test]
    fn parameter_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("ngrpc.toml"),
            "[generator]\nbackend = \"google\"\nmessage-import-prefix = \"m\"\nservice-import-prefix = \"s\"\n",
        )
        .unwrap();

        let files = generate(&args(&dir, None), dir.path()).unwrap();
        assert!(files[0].content.contains("from 'grpc-web';"));

        let files = generate(&args(&dir, Some("backend=improbable-eng")), dir.path()).unwrap();
        assert!(files[0].content.contains("from '@improbable-eng/grpc-web';"));
    }

    #[test]
    fn selected_files_only() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, Some("backend=google,message-import-prefix=m,service-import-prefix=s"));
        args.files = vec!["greet/messages.proto".to_string()];
        assert!(generate(&args, dir.path()).unwrap().is_empty());

        args.files = vec!["greet/unknown.proto".to_string()];
        let err = generate(&args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("greet/unknown.proto"));
    }

    #[test]
    fn option_errors_fail_before_reading_input() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, Some("message-import-prefix=m,service-import-prefix=s"));
        args.descriptor_set = dir.path().join("missing.pb");
        let err = generate(&args, dir.path()).unwrap_err();
        assert!(err.to_string().contains("backend is required"), "{err}");
    }
}
