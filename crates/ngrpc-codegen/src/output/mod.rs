//! Shape emitters and backend call strategies.
//!
//! Each call shape has one [`ShapeEmitter`]. Emitters produce the overload
//! signatures and the argument-disambiguation body shared by every backend,
//! and delegate the transport invocation to the run's [`Transport`].

#[cfg(feature = "backend-google")]
pub mod google;

#[cfg(feature = "backend-improbable-eng")]
pub mod improbable;

mod server_streaming;
mod unary;

pub use server_streaming::ServerStreamingEmitter;
pub use unary::UnaryEmitter;

use crate::deps::DependencyGroup;
use crate::ir::{MethodDefinition, ServiceDefinition};
use crate::naming::lower_first;
use crate::options::OptionSet;
use crate::printer::{Printer, Vars, vars};
use crate::shape::{CallShape, classify};
use crate::traits::Transport;

/// Host expression the generated clients connect to.
pub(crate) const DEFAULT_HOST: &str =
    "(<any>window).DEFAULT_ANGULAR_GRPC_HOST || 'https://' + location.hostname";

/// Everything an emitter may read while generating one service.
pub struct EmitContext<'a> {
    pub options: &'a OptionSet,
    pub transport: &'static dyn Transport,
    pub service: &'a ServiceDefinition,
    pub dependencies: &'a DependencyGroup,
}

impl EmitContext<'_> {
    /// Substitution variables common to every method of the service.
    pub fn method_vars(&self, method: &MethodDefinition) -> Vars {
        let descriptor = &self.options.descriptor;
        let mut vars = vars([
            ("service_name", self.service.name.as_str()),
            ("method_name", &lower_first(&method.name)),
            ("Method_name", method.name.as_str()),
            ("input_type", self.dependencies.binding(&method.input)),
            ("output_type", self.dependencies.binding(&method.output)),
            ("metadata_type", descriptor.metadata_type),
            ("status_code_namespace", descriptor.status_code_namespace),
            ("cancel_method", self.transport.cancel_method()),
        ]);
        vars.insert("host", DEFAULT_HOST.to_string());
        vars
    }
}

/// Emission strategy for one call shape.
pub trait ShapeEmitter: Send + Sync {
    fn shape(&self) -> CallShape;

    /// Emit the method stub (signatures and implementation) into the class body.
    fn emit(&self, printer: &mut Printer, ctx: &EmitContext<'_>, method: &MethodDefinition);
}

/// Placeholder for shapes without a generated stub. Emits nothing.
pub struct UnimplementedEmitter(CallShape);

impl ShapeEmitter for UnimplementedEmitter {
    fn shape(&self) -> CallShape {
        self.0
    }

    fn emit(&self, _printer: &mut Printer, ctx: &EmitContext<'_>, method: &MethodDefinition) {
        tracing::debug!(
            service = %ctx.service.name,
            method = %method.name,
            shape = %self.0,
            "call shape not supported by the generator, no stub emitted"
        );
    }
}

pub static UNARY_EMITTER: UnaryEmitter = UnaryEmitter;
pub static SERVER_STREAMING_EMITTER: ServerStreamingEmitter = ServerStreamingEmitter;
pub static CLIENT_STREAMING_EMITTER: UnimplementedEmitter =
    UnimplementedEmitter(CallShape::ClientStreaming);
pub static BIDI_STREAMING_EMITTER: UnimplementedEmitter =
    UnimplementedEmitter(CallShape::Bidirectional);

/// The emitter responsible for `shape`.
pub fn emitter_for(shape: CallShape) -> &'static dyn ShapeEmitter {
    match shape {
        CallShape::Unary => &UNARY_EMITTER,
        CallShape::ServerStreaming => &SERVER_STREAMING_EMITTER,
        CallShape::ClientStreaming => &CLIENT_STREAMING_EMITTER,
        CallShape::Bidirectional => &BIDI_STREAMING_EMITTER,
    }
}

/// Emit one `@Injectable()` wrapper class for the context's service.
pub fn emit_service(printer: &mut Printer, ctx: &EmitContext<'_>) {
    let service = ctx.service;
    let vars = vars([("service_name", service.name.as_str())]);

    printer.print_raw("\n");
    printer.print_doc_comment(service.docs.as_deref());
    printer.print_raw("@Injectable()\n");
    printer.print(&vars, "export class $service_name$ {\n\n");
    printer.indent();

    ctx.transport.emit_client_field(printer, &vars);

    printer.print_raw("constructor(private _ngZone: NgZone) {\n");
    printer.indent();
    ctx.transport.emit_client_init(printer, &vars);
    printer.outdent();
    printer.print_raw("}\n\n");

    for method in &service.methods {
        let shape = classify(method);
        tracing::debug!(service = %service.name, method = %method.name, %shape, "emitting method");
        emitter_for(shape).emit(printer, ctx, method);
    }

    printer.outdent();
    printer.print_raw("}\n");
}

/// Emit the statements that turn a non-OK transport status into an `Error`
/// carrying the numeric status as `code`, and hand it to `handler`.
pub(crate) fn emit_status_error(printer: &mut Printer, code: &str, message: &str, handler: &str) {
    printer.print(
        &vars([("code", code), ("message", message), ("handler", handler)]),
        "let error = new Error($code$ + ' ' + ($message$ || ''));\n\
         (<any>error).code = $code$;\n\
         $handler$(error);\n",
    );
}
