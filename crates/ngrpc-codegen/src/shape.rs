//! Call shape classification.

use crate::ir::MethodDefinition;
use serde::{Deserialize, Serialize};

/// The streaming shape of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallShape {
    Unary,
    ServerStreaming,
    ClientStreaming,
    Bidirectional,
}

impl CallShape {
    /// Shape for a pair of streaming flags.
    pub fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => CallShape::Unary,
            (false, true) => CallShape::ServerStreaming,
            (true, false) => CallShape::ClientStreaming,
            (true, true) => CallShape::Bidirectional,
        }
    }

    /// Whether the generator emits a client stub for this shape.
    ///
    /// Client-streaming and bidirectional methods are skipped.
    pub fn is_implemented(self) -> bool {
        matches!(self, CallShape::Unary | CallShape::ServerStreaming)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallShape::Unary => "unary",
            CallShape::ServerStreaming => "server-streaming",
            CallShape::ClientStreaming => "client-streaming",
            CallShape::Bidirectional => "bidirectional",
        }
    }
}

impl std::fmt::Display for CallShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a method by its streaming flags.
pub fn classify(method: &MethodDefinition) -> CallShape {
    CallShape::from_flags(method.client_streaming, method.server_streaming)
}
