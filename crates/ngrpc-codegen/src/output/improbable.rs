//! Backend for the `@improbable-eng/grpc-web` package.
//!
//! Every call goes through `grpc.invoke` with the generated method
//! descriptor. Results are reported through `onHeaders`, `onMessage` and
//! `onEnd`; a non-OK end status becomes an error.

use super::emit_status_error;
use crate::printer::{Printer, Vars};
use crate::traits::{BackendDescriptor, BackendKind, Transport};

pub static IMPROBABLE_ENG_BACKEND: ImprobableEngBackend = ImprobableEngBackend;

static DESCRIPTOR: BackendDescriptor = BackendDescriptor {
    import_module: "@improbable-eng/grpc-web",
    import_binding: "{ grpc }",
    service_file_suffix: "_pb_service",
    metadata_type: "grpc.Metadata",
    status_code_namespace: "grpc.Code",
};

pub struct ImprobableEngBackend;

impl ImprobableEngBackend {
    fn emit_invoke_head(&self, printer: &mut Printer, vars: &Vars, binding: &str) {
        printer.print(
            vars,
            &format!(
                "{binding}grpc.invoke(__$service_name$.$Method_name$, {{\n\
                 \x20 request: request,\n\
                 \x20 host: $host$,\n\
                 \x20 metadata: metadata,\n"
            ),
        );
    }
}

impl Transport for ImprobableEngBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::ImprobableEng
    }

    fn descriptor(&self) -> &'static BackendDescriptor {
        &DESCRIPTOR
    }

    fn service_import(&self, service_name: &str) -> String {
        format!("{service_name} as __{service_name}")
    }

    fn emit_unary_call(&self, printer: &mut Printer, vars: &Vars) {
        printer.print(vars, "let responseMetadata: $metadata_type$|null = null;\n\n");
        self.emit_invoke_head(printer, vars, "");
        printer.indent();
        printer.print(
            vars,
            "onHeaders: (headers: $metadata_type$) => {\n\
             \x20 responseMetadata = headers;\n\
             },\n\
             onMessage: (response: $output_type$) => this._ngZone.run(() => {\n\
             \x20 callback(null, response, responseMetadata || new grpc.Metadata());\n\
             }),\n\
             onEnd: (code: $status_code_namespace$, msg: string|undefined, trailers: $metadata_type$) => this._ngZone.run(() => {\n\
             \x20 if(code != $status_code_namespace$.OK) {\n",
        );
        printer.indent();
        printer.indent();
        emit_status_error(printer, "code", "msg", "callback");
        printer.outdent();
        printer.outdent();
        printer.print_raw("  }\n}),\n");
        printer.outdent();
        printer.print_raw("});\n\n");
    }

    fn emit_server_streaming_call(&self, printer: &mut Printer, vars: &Vars) {
        self.emit_invoke_head(printer, vars, "let req = ");
        printer.indent();
        printer.print(
            vars,
            "onMessage: (response: $output_type$) => this._ngZone.run(() => {\n\
             \x20 onMessage(response);\n\
             }),\n\
             onEnd: (code: $status_code_namespace$, msg: string|undefined, trailers: $metadata_type$) => this._ngZone.run(() => {\n\
             \x20 if(code == $status_code_namespace$.OK) {\n\
             \x20   onEnd(code, msg, trailers);\n\
             \x20 } else {\n",
        );
        printer.indent();
        printer.indent();
        emit_status_error(printer, "code", "msg", "onError");
        printer.outdent();
        printer.outdent();
        printer.print_raw("  }\n}),\n");
        printer.outdent();
        printer.print_raw("});\n\n");
    }

    fn cancel_method(&self) -> &'static str {
        "close"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DEFAULT_HOST;
    use crate::printer::vars;

    fn method_vars() -> Vars {
        vars([
            ("service_name", "Greeter"),
            ("method_name", "sayHello"),
            ("Method_name", "SayHello"),
            ("input_type", "HelloRequest"),
            ("output_type", "HelloReply"),
            ("metadata_type", "grpc.Metadata"),
            ("status_code_namespace", "grpc.Code"),
            ("host", DEFAULT_HOST),
        ])
    }

    #[test]
    fn service_import_is_aliased() {
        assert_eq!(IMPROBABLE_ENG_BACKEND.service_import("Greeter"), "Greeter as __Greeter");
    }

    #[test]
    fn unary_call_uses_invoke() {
        let mut p = Printer::new();
        IMPROBABLE_ENG_BACKEND.emit_unary_call(&mut p, &method_vars());
        let out = p.finish();
        assert!(out.contains("grpc.invoke(__Greeter.SayHello, {\n  request: request,\n"));
        assert!(out.contains("  host: (<any>window).DEFAULT_ANGULAR_GRPC_HOST || 'https://' + location.hostname,\n"));
        assert!(out.contains("  onHeaders: (headers: grpc.Metadata) => {\n    responseMetadata = headers;\n  },\n"));
        assert!(out.contains("    if(code != grpc.Code.OK) {\n      let error = new Error(code + ' ' + (msg || ''));\n"));
        assert!(out.contains("      callback(error);\n    }\n  }),\n});\n"));
    }

    #[test]
    fn streaming_call_binds_req() {
        let mut p = Printer::new();
        IMPROBABLE_ENG_BACKEND.emit_server_streaming_call(&mut p, &method_vars());
        let out = p.finish();
        assert!(out.starts_with("let req = grpc.invoke(__Greeter.SayHello, {\n"));
        assert!(out.contains("      onEnd(code, msg, trailers);\n    } else {\n"));
        assert!(out.contains("      onError(error);\n"));
    }

    #[test]
    fn no_client_field() {
        let mut p = Printer::new();
        let vars = method_vars();
        IMPROBABLE_ENG_BACKEND.emit_client_field(&mut p, &vars);
        IMPROBABLE_ENG_BACKEND.emit_client_init(&mut p, &vars);
        assert_eq!(p.finish(), "");
    }
}
