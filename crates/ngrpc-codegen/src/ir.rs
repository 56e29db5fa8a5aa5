//! Intermediate representation for service definitions.
//!
//! Schema providers (protoc plugin requests, descriptor sets, JSON fixtures)
//! normalize to this IR before generation. The engine only reads it.

use serde::{Deserialize, Serialize};

/// One input schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDefinition {
    /// Project-relative path with forward slashes (e.g. "foo/helloworld.proto").
    pub name: String,
    /// Schema package, empty when the file declares none.
    #[serde(default)]
    pub package: String,
    /// Services in declaration order.
    #[serde(default)]
    pub services: Vec<ServiceDefinition>,
}

/// A named collection of remote-call methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Simple service name (e.g. "Greeter").
    pub name: String,
    /// Path of the file that defines the service.
    pub file: String,
    /// Leading documentation comment.
    #[serde(default)]
    pub docs: Option<String>,
    /// Methods in declaration order. Emission follows this order.
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

/// One remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    /// Method name as declared (e.g. "SayHello").
    pub name: String,
    pub input: TypeReference,
    pub output: TypeReference,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
    /// Leading documentation comment.
    #[serde(default)]
    pub docs: Option<String>,
}

/// A reference to a message type.
///
/// Two references denote the same type iff their `full_name`s match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// Simple name (e.g. "HelloRequest").
    pub name: String,
    /// Fully-qualified name (e.g. "helloworld.HelloRequest").
    pub full_name: String,
    /// Path of the file that defines the type.
    pub file: String,
}

impl FileDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Add a service, taking the defining-file path from this file.
    pub fn service(mut self, name: impl Into<String>, methods: Vec<MethodDefinition>) -> Self {
        let file = self.name.clone();
        self.services.push(ServiceDefinition {
            name: name.into(),
            file,
            docs: None,
            methods,
        });
        self
    }

    pub fn has_services(&self) -> bool {
        !self.services.is_empty()
    }
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            docs: None,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}

impl MethodDefinition {
    pub fn unary(name: impl Into<String>, input: TypeReference, output: TypeReference) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            client_streaming: false,
            server_streaming: false,
            docs: None,
        }
    }

    pub fn server_streaming(
        name: impl Into<String>,
        input: TypeReference,
        output: TypeReference,
    ) -> Self {
        Self {
            server_streaming: true,
            ..Self::unary(name, input, output)
        }
    }

    pub fn client_streaming(
        name: impl Into<String>,
        input: TypeReference,
        output: TypeReference,
    ) -> Self {
        Self {
            client_streaming: true,
            ..Self::unary(name, input, output)
        }
    }

    pub fn bidi_streaming(
        name: impl Into<String>,
        input: TypeReference,
        output: TypeReference,
    ) -> Self {
        Self {
            client_streaming: true,
            server_streaming: true,
            ..Self::unary(name, input, output)
        }
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }
}

impl TypeReference {
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            file: file.into(),
        }
    }

    /// Build a reference in `package` defined by `file`, deriving the
    /// fully-qualified name.
    pub fn in_package(package: &str, name: impl Into<String>, file: impl Into<String>) -> Self {
        let name = name.into();
        let full_name = if package.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", package, name)
        };
        Self::new(name, full_name, file)
    }
}
