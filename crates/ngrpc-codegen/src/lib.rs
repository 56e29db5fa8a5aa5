//! Angular gRPC-web client-stub generation.
//!
//! `ngrpc-codegen` turns service definitions into injectable Angular service
//! classes that call through a selectable gRPC-web transport.
//!
//! # Architecture
//!
//! ```text
//!  parameter ──> OptionSet ──────────────┐
//!  (options.rs)  (backend + prefixes)    │
//!                                        v
//!  FileDefinition ──> DependencyGroup ──> Generator ──> GeneratedFile*
//!  (ir.rs)            (deps.rs)           (assemble.rs)   ├─ <stem>_ng_grpc_pb.ts
//!                                          │              ├─ <dir>/index.ts
//!                      classify ──> ShapeEmitter          └─ <Name>_ng_grpc.module.ts
//!                      (shape.rs)   (output/)
//!                                      └─> Transport (google | improbable-eng)
//! ```
//!
//! # Example
//!
//! ```
//! use ngrpc_codegen::generate;
//! use ngrpc_codegen::ir::{FileDefinition, MethodDefinition, TypeReference};
//!
//! let req = TypeReference::in_package("helloworld", "HelloRequest", "helloworld.proto");
//! let res = TypeReference::in_package("helloworld", "HelloReply", "helloworld.proto");
//! let file = FileDefinition::new("helloworld.proto")
//!     .with_package("helloworld")
//!     .service("Greeter", vec![MethodDefinition::unary("SayHello", req, res)]);
//!
//! let files = generate(
//!     "backend=google,message-import-prefix=app/proto,service-import-prefix=app/grpc",
//!     &[file],
//! )
//! .unwrap();
//!
//! assert_eq!(files[0].name, "helloworld_ng_grpc_pb.ts");
//! assert!(files[0].content.contains("export class Greeter {"));
//! ```
//!
//! # Feature Flags
//!
//! Backend flags (use `backend-*` prefix, both enabled by default):
//! - `backend-google` - the `grpc-web` package
//! - `backend-improbable-eng` - the `@improbable-eng/grpc-web` package

pub mod assemble;
pub mod deps;
pub mod error;
pub mod ir;
pub mod naming;
pub mod options;
pub mod output;
pub mod printer;
pub mod registry;
pub mod shape;
pub mod traits;

pub use assemble::{GeneratedFile, Generator, generate};
pub use error::{ConfigError, GenerateError};
pub use options::OptionSet;
pub use registry::{backend_names, backends, get_backend};
pub use shape::{CallShape, classify};
pub use traits::{BackendDescriptor, BackendKind, Transport};
