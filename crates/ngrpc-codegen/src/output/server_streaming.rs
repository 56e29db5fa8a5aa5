//! Server-streaming stubs.
//!
//! Without an `onMessage` handler the call returns an `Observable` fed by a
//! `Subject`; the observable also carries `cancel()` and a deprecated
//! `close()` that forward to the transport's cancellation primitive.

use super::{EmitContext, ShapeEmitter};
use crate::ir::MethodDefinition;
use crate::printer::Printer;
use crate::shape::CallShape;

pub struct ServerStreamingEmitter;

const STREAM_TYPE: &str = "{cancel():void;close():void}&Observable<$output_type$>";

const OVERLOADS: [&str; 4] = [
    "$method_name$(request: $input_type$, metadata?: $metadata_type$): $stream_type$;\n",
    "$method_name$(request: $input_type$, onMessage: $on_message$, onError?: $on_error$, onEnd?: $on_end$): void;\n",
    "$method_name$(request: $input_type$, metadata: $metadata_type$, onMessage: $on_message$, onError?: $on_error$, onEnd?: $on_end$): void;\n",
    "$method_name$(request: $input_type$, metadata?: $metadata_type$, onMessage?: $on_message$, onError?: $on_error$, onEnd?: $on_end$): $stream_type$|void;\n",
];

const IMPLEMENTATION: &str = "$method_name$(request: $input_type$, arg1?: $metadata_type$|($on_message$), arg2?: ($on_message$)|($on_error$), arg3?: ($on_error$)|($on_end$), arg4?: $on_end$): $stream_type$|void {\n";

const DISAMBIGUATE: &str = "\
let ret: any;
let metadata: any;
let onMessage: any;
let onError: any;
let onEnd: any;

if(typeof arg1 === 'function') {
  onMessage = arg1;
  onError = arg2;
  onEnd = arg3;
} else {
  metadata = arg1;
  onMessage = arg2;
  onError = arg3;
  onEnd = arg4;
}

if(!onMessage) {
  let subject = new Subject<$output_type$>();
  ret = subject.asObservable();

  onMessage = (response: $output_type$) => {
    subject.next(response);
  };

  onError = (err: any) => {
    subject.error(err);
  };

  onEnd = (code: $status_code_namespace$, msg: string|undefined, trailers: $metadata_type$) => {
    subject.complete();
  };
} else {
  if(!onError) {
    onError = (err: any) => console.error(err);
  }

  if(!onEnd) {
    onEnd = (code: $status_code_namespace$, msg: string|undefined, trailers: $metadata_type$) => {};
  }
}

";

const CANCELLATION: &str = "\
if(ret) {
  ret.cancel = () => req.$cancel_method$();
  ret.close = () => {
    console.warn('[Angular Grpc] .close() is deprecated, use .cancel() instead');
    return ret.cancel();
  };
}

return ret;
";

impl ShapeEmitter for ServerStreamingEmitter {
    fn shape(&self) -> CallShape {
        CallShape::ServerStreaming
    }

    fn emit(&self, printer: &mut Printer, ctx: &EmitContext<'_>, method: &MethodDefinition) {
        let mut vars = ctx.method_vars(method);
        let output = vars["output_type"].clone();
        let metadata = vars["metadata_type"].clone();
        let status = vars["status_code_namespace"].clone();
        vars.insert("stream_type", STREAM_TYPE.replace("$output_type$", &output));
        vars.insert("on_message", format!("(response: {output}) => void"));
        vars.insert("on_error", "(err: any) => void".to_string());
        vars.insert(
            "on_end",
            format!("(code: {status}, msg: string|undefined, trailers: {metadata}) => void"),
        );

        for overload in OVERLOADS {
            printer.print_doc_comment(method.docs.as_deref());
            printer.print(&vars, overload);
        }
        printer.print(&vars, IMPLEMENTATION);
        printer.indent();
        printer.print(&vars, DISAMBIGUATE);
        ctx.transport.emit_server_streaming_call(printer, &vars);
        printer.print(&vars, CANCELLATION);
        printer.outdent();
        printer.print_raw("}\n\n");
    }
}
