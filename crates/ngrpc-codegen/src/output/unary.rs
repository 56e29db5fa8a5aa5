//! Unary stubs: four overloads plus a Promise fallback when no callback is given.

use super::{EmitContext, ShapeEmitter};
use crate::ir::MethodDefinition;
use crate::printer::Printer;
use crate::shape::CallShape;

pub struct UnaryEmitter;

const OVERLOADS: [&str; 4] = [
    "$method_name$(request: $input_type$): Promise<$output_type$>;\n",
    "$method_name$(request: $input_type$, metadata: $metadata_type$): Promise<$output_type$>;\n",
    "$method_name$(request: $input_type$, callback: $callback_type$): void;\n",
    "$method_name$(request: $input_type$, metadata: $metadata_type$, callback: $callback_type$): void;\n",
];

const DISAMBIGUATE: &str = "\
let ret: Promise<$output_type$>|undefined;
let metadata: any;
let callback: any;

if(typeof arg1 === 'function') {
  callback = arg1;
} else {
  metadata = arg1;
  callback = arg2;
}

if(!callback) {
  ret = new Promise<$output_type$>((resolve, reject) => {
    callback = (err: any|null, response: $output_type$, responseMetadata: $metadata_type$) => {
      if(err) {
        reject(err);
      } else {
        resolve(response);
      }
    };
  });
}

";

impl ShapeEmitter for UnaryEmitter {
    fn shape(&self) -> CallShape {
        CallShape::Unary
    }

    fn emit(&self, printer: &mut Printer, ctx: &EmitContext<'_>, method: &MethodDefinition) {
        let mut vars = ctx.method_vars(method);
        let callback_type = format!(
            "(err: any|null, response: {}, metadata: {}) => void",
            vars["output_type"], vars["metadata_type"]
        );
        vars.insert("callback_type", callback_type);

        for overload in OVERLOADS {
            printer.print_doc_comment(method.docs.as_deref());
            printer.print(&vars, overload);
        }
        printer.print(
            &vars,
            "$method_name$(request: $input_type$, arg1?: $metadata_type$|($callback_type$), arg2?: $callback_type$): Promise<$output_type$>|void {\n",
        );
        printer.indent();
        printer.print(&vars, DISAMBIGUATE);
        ctx.transport.emit_unary_call(printer, &vars);
        printer.print_raw("return ret;\n");
        printer.outdent();
        printer.print_raw("}\n\n");
    }
}
