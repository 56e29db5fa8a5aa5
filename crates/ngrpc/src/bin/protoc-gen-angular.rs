//! protoc-gen-angular
//!
//! protoc plugin generating Angular services for gRPC-web.
//!
//! Usage:
//!   protoc --angular_out=backend=google,message-import-prefix=app/proto,service-import-prefix=app/grpc:./gen proto/*.proto
//!   protoc --angular_out=backend=improbable-eng,message-import-prefix=app/proto,service-import-prefix=app/grpc,index:./gen proto/*.proto

use anyhow::Context;
use std::io::{self, Read, Write};

fn main() -> anyhow::Result<()> {
    ngrpc::logging::init(false);

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("failed to read the request from stdin")?;

    let output = ngrpc::plugin::process(&input).context("failed to decode CodeGeneratorRequest")?;

    io::stdout()
        .write_all(&output)
        .context("failed to write the response to stdout")?;
    Ok(())
}
