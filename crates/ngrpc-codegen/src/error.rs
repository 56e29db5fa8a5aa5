//! Error types.

use crate::traits::BackendKind;

/// Invalid or incomplete generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("options: backend is required. Valid options are {valid}", valid = valid_backends())]
    MissingBackend,

    #[error("options: invalid backend value '{0}'. Valid options are {valid}", valid = valid_backends())]
    InvalidBackend(String),

    #[error("options: backend '{0}' is not enabled in this build")]
    BackendUnavailable(BackendKind),

    #[error("options: {0} must not be empty")]
    EmptyOption(&'static str),

    #[error("options: invalid value '{value}' for {key}, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("options: module-name '{0}' is not a valid identifier")]
    InvalidModuleName(String),

    #[error("options: incomplete descriptor for backend '{0}'")]
    IncompleteDescriptor(BackendKind),
}

/// A failed generation run. No output from the run may be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("two generated files resolve to the same path: {0}")]
    DuplicateOutput(String),
}

fn valid_backends() -> String {
    let tags: Vec<String> = BackendKind::ALL
        .iter()
        .map(|kind| format!("'{}'", kind.tag()))
        .collect();
    tags.join(" or ")
}
