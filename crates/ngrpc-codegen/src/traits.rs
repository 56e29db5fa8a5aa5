//! Traits for transport backends.

use crate::printer::{Printer, Vars};
use serde::Serialize;

/// The closed set of transport backends the generated client can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// The `grpc-web` package.
    Google,
    /// The `@improbable-eng/grpc-web` package.
    ImprobableEng,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Google, BackendKind::ImprobableEng];

    /// Option value selecting this backend.
    pub fn tag(self) -> &'static str {
        match self {
            BackendKind::Google => "google",
            BackendKind::ImprobableEng => "improbable-eng",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Static facts about a backend that generated code depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendDescriptor {
    /// Module the transport is imported from (e.g. "grpc-web").
    pub import_module: &'static str,
    /// Import clause binding the module (e.g. "* as grpc").
    pub import_binding: &'static str,
    /// Suffix of the transport's generated service file (e.g. "_grpc_web_pb").
    pub service_file_suffix: &'static str,
    /// Type of call metadata (e.g. "grpc.Metadata").
    pub metadata_type: &'static str,
    /// Namespace holding status codes (e.g. "grpc.StatusCode").
    pub status_code_namespace: &'static str,
}

impl BackendDescriptor {
    /// All fields are non-empty.
    pub fn is_complete(&self) -> bool {
        [
            self.import_module,
            self.import_binding,
            self.service_file_suffix,
            self.metadata_type,
            self.status_code_namespace,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

/// A transport backend.
///
/// Backends supply the handful of places where generated code differs:
/// the service import, client construction, the transport invocation and the
/// event wiring for each implemented call shape. Shape emitters own everything
/// else (signatures, argument disambiguation, promise/observable plumbing).
///
/// Every call strategy receives the method's substitution variables, which
/// include at least `service_name`, `method_name`, `Method_name`,
/// `input_type`, `output_type`, `metadata_type` and `status_code_namespace`.
/// Unary strategies must finish by calling `callback(err)` or
/// `callback(null, response, metadata)`. Server-streaming strategies must bind
/// the call handle to `req` and report through `onMessage`, `onError` and
/// `onEnd`.
pub trait Transport: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn descriptor(&self) -> &'static BackendDescriptor;

    /// Import specifier for a service's transport binding, aliased so it does
    /// not collide with the generated wrapper class of the same name.
    fn service_import(&self, service_name: &str) -> String;

    /// Fields declared at the top of the wrapper class.
    fn emit_client_field(&self, _printer: &mut Printer, _vars: &Vars) {}

    /// Statements run in the wrapper constructor.
    fn emit_client_init(&self, _printer: &mut Printer, _vars: &Vars) {}

    fn emit_unary_call(&self, printer: &mut Printer, vars: &Vars);

    fn emit_server_streaming_call(&self, printer: &mut Printer, vars: &Vars);

    /// Name of the transport's native cancellation primitive on a stream handle.
    fn cancel_method(&self) -> &'static str;

    fn name(&self) -> &'static str {
        self.kind().tag()
    }
}
