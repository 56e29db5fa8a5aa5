//! Adapters around `ngrpc-codegen`: protobuf descriptor conversion, the
//! protoc plugin protocol, and the `ngrpc` command line.
//!
//! Two binaries are built from this crate:
//!
//! - `protoc-gen-angular`, invoked by protoc:
//!   `protoc --angular_out=backend=google,message-import-prefix=app/proto,service-import-prefix=app/grpc:src/app/proto hello.proto`
//! - `ngrpc`, which generates from a `FileDescriptorSet` on disk:
//!   `ngrpc generate descriptors.pb --parameter backend=improbable-eng,... --out-dir src/app/proto`

pub mod commands;
pub mod config;
pub mod descriptor;
pub mod logging;
pub mod plugin;
