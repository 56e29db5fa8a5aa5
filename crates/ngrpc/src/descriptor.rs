//! Conversion from protobuf file descriptors to the generator IR.
//!
//! Both the protoc plugin request and a `FileDescriptorSet` carry
//! `FileDescriptorProto`s; everything the generator needs is read from them
//! here. Message types are indexed across every supplied file (nested types
//! included) so that methods may reference types from imported files.

use ngrpc_codegen::ir::{FileDefinition, MethodDefinition, ServiceDefinition, TypeReference};
use prost_types::{DescriptorProto, FileDescriptorProto, SourceCodeInfo};
use std::collections::BTreeMap;

/// `FileDescriptorProto.service`
const FILE_SERVICE_FIELD: i32 = 6;
/// `ServiceDescriptorProto.method`
const SERVICE_METHOD_FIELD: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("file to generate is not among the supplied descriptors: {0}")]
    MissingFile(String),

    #[error("{method}: unknown message type '{type_name}'")]
    UnknownType { method: String, type_name: String },
}

/// Convert the descriptors of `files_to_generate` into generator input.
///
/// `proto_files` must contain every file the requested files depend on.
/// Output order follows `files_to_generate`.
pub fn files_from_descriptors<S: AsRef<str>>(
    proto_files: &[FileDescriptorProto],
    files_to_generate: &[S],
) -> Result<Vec<FileDefinition>, DescriptorError> {
    let index = TypeIndex::build(proto_files);

    files_to_generate
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let file = proto_files
                .iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| DescriptorError::MissingFile(name.to_string()))?;
            convert_file(file, &index)
        })
        .collect()
}

/// Every message type of the run, keyed by fully-qualified name with the
/// leading dot used in descriptor type references.
struct TypeIndex {
    types: BTreeMap<String, TypeReference>,
}

impl TypeIndex {
    fn build(files: &[FileDescriptorProto]) -> Self {
        let mut types = BTreeMap::new();
        for file in files {
            let scope = if file.package().is_empty() {
                String::new()
            } else {
                format!(".{}", file.package())
            };
            index_messages(&mut types, file.name(), &scope, &file.message_type);
        }
        tracing::debug!(types = types.len(), "indexed message types");
        Self { types }
    }

    fn resolve(&self, method: &str, type_name: &str) -> Result<TypeReference, DescriptorError> {
        let key = if type_name.starts_with('.') {
            type_name.to_string()
        } else {
            format!(".{type_name}")
        };
        self.types
            .get(&key)
            .cloned()
            .ok_or_else(|| DescriptorError::UnknownType {
                method: method.to_string(),
                type_name: type_name.to_string(),
            })
    }
}

fn index_messages(
    types: &mut BTreeMap<String, TypeReference>,
    file: &str,
    scope: &str,
    messages: &[DescriptorProto],
) {
    for message in messages {
        let key = format!("{scope}.{}", message.name());
        let reference = TypeReference::new(message.name(), &key[1..], file);
        index_messages(types, file, &key, &message.nested_type);
        types.insert(key, reference);
    }
}

fn convert_file(
    file: &FileDescriptorProto,
    index: &TypeIndex,
) -> Result<FileDefinition, DescriptorError> {
    let comments = Comments::new(file.source_code_info.as_ref());
    let mut definition = FileDefinition::new(file.name()).with_package(file.package());

    for (i, service) in file.service.iter().enumerate() {
        let mut converted = ServiceDefinition::new(service.name(), file.name());
        if let Some(docs) = comments.leading(&[FILE_SERVICE_FIELD, i as i32]) {
            converted = converted.with_docs(docs);
        }

        for (j, method) in service.method.iter().enumerate() {
            let qualified = format!("{}.{}", service.name(), method.name());
            let mut converted_method = MethodDefinition {
                name: method.name().to_string(),
                input: index.resolve(&qualified, method.input_type())?,
                output: index.resolve(&qualified, method.output_type())?,
                client_streaming: method.client_streaming(),
                server_streaming: method.server_streaming(),
                docs: None,
            };
            let path = [FILE_SERVICE_FIELD, i as i32, SERVICE_METHOD_FIELD, j as i32];
            if let Some(docs) = comments.leading(&path) {
                converted_method = converted_method.with_docs(docs);
            }
            converted = converted.with_method(converted_method);
        }

        definition.services.push(converted);
    }

    tracing::debug!(
        file = %definition.name,
        services = definition.services.len(),
        "converted descriptor"
    );
    Ok(definition)
}

/// Leading comments by source path.
struct Comments<'a> {
    by_path: BTreeMap<&'a [i32], &'a str>,
}

impl<'a> Comments<'a> {
    fn new(info: Option<&'a SourceCodeInfo>) -> Self {
        let by_path = info
            .into_iter()
            .flat_map(|info| &info.location)
            .filter_map(|location| {
                let comment = location.leading_comments.as_deref()?;
                (!comment.trim().is_empty()).then_some((location.path.as_slice(), comment))
            })
            .collect();
        Self { by_path }
    }

    fn leading(&self, path: &[i32]) -> Option<&'a str> {
        self.by_path.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::source_code_info::Location;
    use prost_types::{MethodDescriptorProto, ServiceDescriptorProto};

    fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            nested_type: nested,
            ..Default::default()
        }
    }

    fn method(name: &str, input: &str, output: &str, server_streaming: bool) -> MethodDescriptorProto {
        MethodDescriptorProto {
            name: Some(name.to_string()),
            input_type: Some(input.to_string()),
            output_type: Some(output.to_string()),
            server_streaming: Some(server_streaming),
            ..Default::default()
        }
    }

    fn comment(path: Vec<i32>, text: &str) -> Location {
        Location {
            path,
            leading_comments: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn common() -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("common/money.proto".to_string()),
            package: Some("common".to_string()),
            message_type: vec![message("Money", vec![message("Currency", vec![])])],
            ..Default::default()
        }
    }

    fn greeter() -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("helloworld.proto".to_string()),
            package: Some("helloworld".to_string()),
            dependency: vec!["common/money.proto".to_string()],
            message_type: vec![message("HelloRequest", vec![]), message("HelloReply", vec![])],
            service: vec![ServiceDescriptorProto {
                name: Some("Greeter".to_string()),
                method: vec![
                    method("SayHello", ".helloworld.HelloRequest", ".helloworld.HelloReply", false),
                    method("Tip", ".helloworld.HelloRequest", ".common.Money.Currency", true),
                ],
                ..Default::default()
            }],
            source_code_info: Some(SourceCodeInfo {
                location: vec![
                    comment(vec![6, 0], " The greeting service.\n"),
                    comment(vec![6, 0, 2, 0], " Sends a greeting.\n"),
                    comment(vec![6, 0, 2, 1], "  \n"),
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn converts_services_and_methods() {
        let files = files_from_descriptors(&[common(), greeter()], &["helloworld.proto"]).unwrap();
        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(file.name, "helloworld.proto");
        assert_eq!(file.package, "helloworld");

        let service = &file.services[0];
        assert_eq!(service.name, "Greeter");
        assert_eq!(service.file, "helloworld.proto");
        assert_eq!(service.docs.as_deref(), Some(" The greeting service.\n"));

        let say_hello = &service.methods[0];
        assert_eq!(say_hello.input, TypeReference::new("HelloRequest", "helloworld.HelloRequest", "helloworld.proto"));
        assert_eq!(say_hello.docs.as_deref(), Some(" Sends a greeting.\n"));
        assert!(!say_hello.server_streaming);
    }

    #[test]
    fn resolves_nested_types_from_other_files() {
        let files = files_from_descriptors(&[common(), greeter()], &["helloworld.proto"]).unwrap();
        let tip = &files[0].services[0].methods[1];
        assert_eq!(tip.output, TypeReference::new("Currency", "common.Money.Currency", "common/money.proto"));
        assert!(tip.server_streaming);
        assert_eq!(tip.docs, None);
    }

    #[test]
    fn unknown_type_fails() {
        let err = files_from_descriptors(&[greeter()], &["helloworld.proto"]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnknownType {
                method: "Greeter.Tip".into(),
                type_name: ".common.Money.Currency".into(),
            }
        );
        assert_eq!(err.to_string(), "Greeter.Tip: unknown message type '.common.Money.Currency'");
    }

    #[test]
    fn missing_file_fails() {
        let err = files_from_descriptors(&[common()], &["helloworld.proto"]).unwrap_err();
        assert_eq!(err, DescriptorError::MissingFile("helloworld.proto".into()));
    }

    #[test]
    fn output_follows_request_order() {
        let files = files_from_descriptors(&[greeter(), common()], &["common/money.proto", "helloworld.proto"]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["common/money.proto", "helloworld.proto"]);
        assert!(!files[0].has_services());
    }

    #[test]
    fn package_less_files() {
        let file = FileDescriptorProto {
            name: Some("bare.proto".to_string()),
            message_type: vec![message("Ping", vec![])],
            service: vec![ServiceDescriptorProto {
                name: Some("Pinger".to_string()),
                method: vec![method("Ping", ".Ping", ".Ping", false)],
                ..Default::default()
            }],
            ..Default::default()
        };
        let files = files_from_descriptors(&[file], &["bare.proto"]).unwrap();
        assert_eq!(files[0].services[0].methods[0].input.full_name, "Ping");
    }
}
