//! Configuration file for the `ngrpc` CLI.
//!
//! Loaded from `--config <path>`, or from `ngrpc.toml` in the working
//! directory when present. Its options are applied before the ones given with
//! `--parameter`, so the command line wins.
//!
//! Example ngrpc.toml:
//! ```toml
//! [generator]
//! backend = "google"
//! message-import-prefix = "app/proto"
//! service-import-prefix = "app/grpc"
//! module-name = "AppGrpcModule"
//! index = false
//! ```

use anyhow::Context;
use ngrpc_codegen::options::{INDEX, MESSAGE_IMPORT_PREFIX, MODULE_NAME, SERVICE_IMPORT_PREFIX};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "ngrpc.toml";

/// Generator options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    pub backend: Option<String>,
    pub message_import_prefix: Option<String>,
    pub service_import_prefix: Option<String>,
    pub module_name: Option<String>,
    pub index: Option<bool>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NgrpcConfig {
    pub generator: GeneratorConfig,
}

impl NgrpcConfig {
    /// Load the explicit config file, or `ngrpc.toml` under `cwd` if it exists.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = default_path(cwd);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        Self::load(&path)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// The configured options as `(key, value)` pairs.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let generator = &self.generator;
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };
        push("backend", generator.backend.clone());
        push(MESSAGE_IMPORT_PREFIX, generator.message_import_prefix.clone());
        push(SERVICE_IMPORT_PREFIX, generator.service_import_prefix.clone());
        push(MODULE_NAME, generator.module_name.clone());
        push(INDEX, generator.index.map(|index| index.to_string()));
        pairs
    }
}

/// Default location of the config file for `cwd`.
pub fn default_path(cwd: &Path) -> PathBuf {
    cwd.join(CONFIG_FILE_NAME)
}
