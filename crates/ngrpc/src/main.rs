//! `ngrpc` command line.

use clap::{Parser, Subcommand};
use ngrpc::commands::backends::{self, BackendsArgs};
use ngrpc::commands::generate::{self, GenerateArgs};

#[derive(Parser)]
#[command(name = "ngrpc", author, version, about = "Generate Angular gRPC-web client services")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate Angular services from a FileDescriptorSet
    Generate(GenerateArgs),
    /// List the available transport backends
    Backends(BackendsArgs),
}

fn main() {
    let cli = Cli::parse();
    ngrpc::logging::init(cli.verbose);

    let result = match cli.command {
        Command::Generate(args) => generate::run(args),
        Command::Backends(args) => backends::run(args),
    };
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
