//! Registry of built-in transport backends.

use crate::traits::{BackendKind, Transport};

/// All backends compiled into this build.
#[allow(unused_mut)]
pub fn backends() -> Vec<&'static dyn Transport> {
    let mut backends: Vec<&'static dyn Transport> = Vec::new();

    #[cfg(feature = "backend-google")]
    {
        backends.push(&crate::output::google::GOOGLE_BACKEND);
    }

    #[cfg(feature = "backend-improbable-eng")]
    {
        backends.push(&crate::output::improbable::IMPROBABLE_ENG_BACKEND);
    }

    backends
}

/// Get a backend by kind, if it is compiled in.
pub fn get_backend(kind: BackendKind) -> Option<&'static dyn Transport> {
    backends().into_iter().find(|b| b.kind() == kind)
}

/// List the option values of all compiled-in backends.
pub fn backend_names() -> Vec<&'static str> {
    backends().iter().map(|b| b.name()).collect()
}
