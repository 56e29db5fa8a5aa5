//! protoc plugin protocol.
//!
//! protoc writes a `CodeGeneratorRequest` to the plugin's stdin and reads a
//! `CodeGeneratorResponse` from its stdout. Generation failures are reported
//! in the response's `error` field; only a malformed request is a hard error.

use crate::descriptor::files_from_descriptors;
use ngrpc_codegen::{GeneratedFile, Generator, OptionSet};
use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

/// Handle one decoded request.
pub fn run(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match generate(request) {
        Ok(files) => {
            for file in &files {
                tracing::info!(file = %file.name, bytes = file.content.len(), "generated");
            }
            CodeGeneratorResponse {
                supported_features: Some(Feature::Proto3Optional as u64),
                file: files.into_iter().map(into_response_file).collect(),
                ..Default::default()
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            CodeGeneratorResponse {
                error: Some(err.to_string()),
                supported_features: Some(Feature::Proto3Optional as u64),
                ..Default::default()
            }
        }
    }
}

/// Decode a request, handle it and encode the response.
pub fn process(input: &[u8]) -> Result<Vec<u8>, prost::DecodeError> {
    let request = CodeGeneratorRequest::decode(input)?;
    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "received request"
    );
    Ok(run(&request).encode_to_vec())
}

fn generate(request: &CodeGeneratorRequest) -> anyhow::Result<Vec<GeneratedFile>> {
    let options = OptionSet::resolve(request.parameter())?;
    let generator = Generator::new(options)?;
    let files = files_from_descriptors(&request.proto_file, &request.file_to_generate)?;
    Ok(generator.generate_all(&files)?)
}

fn into_response_file(file: GeneratedFile) -> File {
    File {
        name: Some(file.name),
        content: Some(file.content),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto};

    fn request(parameter: &str) -> CodeGeneratorRequest {
        let file = FileDescriptorProto {
            name: Some("helloworld.proto".to_string()),
            package: Some("helloworld".to_string()),
            message_type: vec![
                DescriptorProto {
                    name: Some("HelloRequest".to_string()),
                    ..Default::default()
                },
                DescriptorProto {
                    name: Some("HelloReply".to_string()),
                    ..Default::default()
                },
            ],
            service: vec![ServiceDescriptorProto {
                name: Some("Greeter".to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some("SayHello".to_string()),
                    input_type: Some(".helloworld.HelloRequest".to_string()),
                    output_type: Some(".helloworld.HelloReply".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        CodeGeneratorRequest {
            file_to_generate: vec!["helloworld.proto".to_string()],
            parameter: Some(parameter.to_string()),
            proto_file: vec![file],
            ..Default::default()
        }
    }

    #[test]
    fn generates_files() {
        let response = run(&request(
            "backend=improbable-eng,message-import-prefix=app/proto,service-import-prefix=app/grpc,module-name=AppGrpc",
        ));
        assert_eq!(response.error, None);
        assert_eq!(response.supported_features, Some(Feature::Proto3Optional as u64));
        let names: Vec<&str> = response.file.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["helloworld_ng_grpc_pb.ts", "AppGrpc_ng_grpc.module.ts"]);
        assert!(response.file[0].content().contains("grpc.invoke(__Greeter.SayHello, {"));
    }

    #[test]
    fn config_error_is_reported_in_response() {
        let response = run(&request("message-import-prefix=a,service-import-prefix=b"));
        assert!(response.file.is_empty());
        let error = response.error.unwrap();
        assert!(error.contains("backend is required"), "{error}");
    }

    #[test]
    fn descriptor_error_is_reported_in_response() {
        let mut request = request("backend=google,message-import-prefix=a,service-import-prefix=b");
        request.proto_file[0].message_type.clear();
        let response = run(&request);
        assert!(response.file.is_empty());
        assert!(response.error.unwrap().contains("unknown message type"));
    }

    #[test]
    fn process_round_trips_wire_format() {
        let bytes = request("backend=google,message-import-prefix=a,service-import-prefix=b").encode_to_vec();
        let response = CodeGeneratorResponse::decode(process(&bytes).unwrap().as_slice()).unwrap();
        assert_eq!(response.file.len(), 1);
        assert!(response.file[0].content().contains("this._client.sayHello("));
    }

    #[test]
    fn garbage_input_is_a_decode_error() {
        assert!(process(&[0xff, 0xff, 0xff]).is_err());
    }
}
