//! Generator options: parameter parsing and backend policy resolution.
//!
//! The raw parameter is a flat `key=value,key=value` string (the protoc
//! plugin `parameter` field). Resolution is a pure function of that string.
//!
//! | key                     | required | meaning                                      |
//! |-------------------------|----------|----------------------------------------------|
//! | `backend`               | yes      | `google` or `improbable-eng`                 |
//! | `message-import-prefix` | yes      | path prefix for message type imports         |
//! | `service-import-prefix` | yes      | path prefix for transport service imports    |
//! | `module-name`           | no       | emit one `@NgModule` aggregating every service |
//! | `index`                 | no       | emit an `index.ts` module per output directory |
//!
//! The spellings used by earlier releases (`grpc-web`, `web_import_prefix`,
//! `grpc_web_import_prefix`, `module_name`) are accepted as aliases.

use crate::error::ConfigError;
use crate::registry;
use crate::traits::{BackendDescriptor, BackendKind};
use serde::Serialize;

pub const MESSAGE_IMPORT_PREFIX: &str = "message-import-prefix";
pub const SERVICE_IMPORT_PREFIX: &str = "service-import-prefix";
pub const MODULE_NAME: &str = "module-name";
pub const INDEX: &str = "index";

/// Resolved configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    pub backend: BackendKind,
    pub descriptor: BackendDescriptor,
    /// Prefix for message imports, without trailing separators.
    pub message_import_prefix: String,
    /// Prefix for transport service imports, without trailing separators.
    pub service_import_prefix: String,
    /// Name of the aggregate `@NgModule`, if one should be generated.
    pub module_name: Option<String>,
    /// Generate an `index.ts` module per output directory.
    pub index: bool,
}

impl OptionSet {
    /// Resolve a raw parameter string.
    pub fn resolve(parameter: &str) -> Result<Self, ConfigError> {
        Self::from_pairs(parse_parameter(parameter))
    }

    /// Resolve already-split option pairs. Later pairs override earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut backend: Option<String> = None;
        let mut message_prefix = String::new();
        let mut service_prefix = String::new();
        let mut module_name: Option<String> = None;
        let mut index: Option<String> = None;

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref();
            let Some(option) = OptionKey::parse(key) else {
                return Err(ConfigError::UnknownOption(key.to_string()));
            };
            match option {
                OptionKey::Backend => backend = Some(value.to_string()),
                OptionKey::MessageImportPrefix => message_prefix = strip_trailing_separators(value),
                OptionKey::ServiceImportPrefix => service_prefix = strip_trailing_separators(value),
                OptionKey::ModuleName => {
                    module_name = (!value.is_empty()).then(|| value.to_string());
                }
                OptionKey::Index => index = Some(value.to_string()),
            }
        }

        let backend = match backend {
            None => return Err(ConfigError::MissingBackend),
            Some(tag) => BackendKind::from_tag(&tag).ok_or(ConfigError::InvalidBackend(tag))?,
        };
        let transport =
            registry::get_backend(backend).ok_or(ConfigError::BackendUnavailable(backend))?;

        if message_prefix.is_empty() {
            return Err(ConfigError::EmptyOption(MESSAGE_IMPORT_PREFIX));
        }
        if service_prefix.is_empty() {
            return Err(ConfigError::EmptyOption(SERVICE_IMPORT_PREFIX));
        }
        if let Some(name) = &module_name {
            if !is_identifier(name) {
                return Err(ConfigError::InvalidModuleName(name.clone()));
            }
        }

        let descriptor = transport.descriptor().clone();
        if !descriptor.is_complete() {
            return Err(ConfigError::IncompleteDescriptor(backend));
        }
        let index = match index {
            Some(value) => parse_bool(INDEX, &value)?,
            None => false,
        };

        Ok(Self {
            backend,
            descriptor,
            message_import_prefix: message_prefix,
            service_import_prefix: service_prefix,
            module_name,
            index,
        })
    }
}

/// Split a parameter string into `(key, value)` pairs.
///
/// Parts are separated by `,`; a part without `=` is a key with an empty
/// value. Empty parts are skipped.
pub fn parse_parameter(parameter: &str) -> Vec<(String, String)> {
    parameter
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => (part.to_string(), String::new()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum OptionKey {
    Backend,
    MessageImportPrefix,
    ServiceImportPrefix,
    ModuleName,
    Index,
}

impl OptionKey {
    /// Recognize a key or one of its legacy spellings.
    fn parse(key: &str) -> Option<Self> {
        match key {
            "backend" | "grpc-web" => Some(Self::Backend),
            "message-import-prefix" | "web_import_prefix" => Some(Self::MessageImportPrefix),
            "service-import-prefix" | "grpc_web_import_prefix" => Some(Self::ServiceImportPrefix),
            "module-name" | "module_name" => Some(Self::ModuleName),
            "index" => Some(Self::Index),
            _ => None,
        }
    }
}

fn strip_trailing_separators(value: &str) -> String {
    value.trim_end_matches(['/', '\\']).to_string()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
