//! Backend for the `grpc-web` package.
//!
//! The wrapper owns one generated `<Service>Client` per instance and invokes
//! methods on it directly. Unary metadata arrives through the `metadata`
//! event; streams report through `data`, `status` and `error`.

use super::{DEFAULT_HOST, emit_status_error};
use crate::printer::{Printer, Vars};
use crate::traits::{BackendDescriptor, BackendKind, Transport};

pub static GOOGLE_BACKEND: GoogleBackend = GoogleBackend;

static DESCRIPTOR: BackendDescriptor = BackendDescriptor {
    import_module: "grpc-web",
    import_binding: "* as grpc",
    service_file_suffix: "_grpc_web_pb",
    metadata_type: "grpc.Metadata",
    status_code_namespace: "grpc.StatusCode",
};

pub struct GoogleBackend;

impl Transport for GoogleBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Google
    }

    fn descriptor(&self) -> &'static BackendDescriptor {
        &DESCRIPTOR
    }

    fn service_import(&self, service_name: &str) -> String {
        format!("{service_name}Client as __{service_name}Client")
    }

    fn emit_client_field(&self, printer: &mut Printer, vars: &Vars) {
        printer.print(vars, "private _client: __$service_name$Client;\n\n");
    }

    fn emit_client_init(&self, printer: &mut Printer, vars: &Vars) {
        printer.print(vars, "this._client = new __$service_name$Client(");
        printer.print_raw(DEFAULT_HOST);
        printer.print_raw(");\n");
    }

    fn emit_unary_call(&self, printer: &mut Printer, vars: &Vars) {
        printer.print(
            vars,
            "let responseMetadata: $metadata_type$|null = null;\n\
             \n\
             let req = this._client.$method_name$(request, metadata || {}, (err: any, response: $output_type$) => this._ngZone.run(() => {\n",
        );
        printer.indent();
        printer.print_raw("if(err) {\n");
        printer.indent();
        emit_status_error(printer, "err.code", "err.message", "callback");
        printer.outdent();
        printer.print_raw("} else {\n");
        printer.print_raw("  callback(null, response, responseMetadata || {});\n");
        printer.print_raw("}\n");
        printer.outdent();
        printer.print(
            vars,
            "}));\n\
             req.on('metadata', (headers: $metadata_type$) => {\n\
             \x20 responseMetadata = headers;\n\
             });\n\
             \n",
        );
    }

    fn emit_server_streaming_call(&self, printer: &mut Printer, vars: &Vars) {
        printer.print(
            vars,
            "let req = this._client.$method_name$(request, metadata || {});\n\
             req.on('data', (response: $output_type$) => this._ngZone.run(() => {\n\
             \x20 onMessage(response);\n\
             }));\n\
             req.on('status', (status: any) => this._ngZone.run(() => {\n\
             \x20 if(status.code == $status_code_namespace$.OK) {\n\
             \x20   onEnd(status.code, status.details, status.metadata);\n\
             \x20 }\n\
             }));\n\
             req.on('error', (err: any) => this._ngZone.run(() => {\n",
        );
        printer.indent();
        emit_status_error(printer, "err.code", "err.message", "onError");
        printer.outdent();
        printer.print_raw("}));\n\n");
    }

    fn cancel_method(&self) -> &'static str {
        "cancel"
    }
}
