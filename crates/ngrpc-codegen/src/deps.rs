//! Dependency collection and import binding.
//!
//! Message types referenced by a file's services are grouped by their defining
//! file, in first-seen order, and deduplicated by `(defining file, simple
//! name)`. Every referenced type is given a local binding: its simple name when
//! that is free, otherwise an alias derived from the defining file. Emitters
//! always refer to types through [`DependencyGroup::binding`].

use crate::ir::{ServiceDefinition, TypeReference};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Types referenced by one service: request then response of each method, in
/// method order, deduplicated by `(defining file, simple name)`.
pub fn collect(service: &ServiceDefinition) -> Vec<&TypeReference> {
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
    let mut types = Vec::new();
    for method in &service.methods {
        for ty in [&method.input, &method.output] {
            if seen.insert((ty.file.as_str(), ty.name.as_str())) {
                types.push(ty);
            }
        }
    }
    types
}

/// Local identifiers already in use in one generated file.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    taken: BTreeSet<String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table where `names` are already bound.
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Bind `name` imported from `file`, returning the local identifier.
    ///
    /// The simple name is used when free; otherwise `<file>_<name>` where
    /// `<file>` is the defining path turned into an identifier, with a numeric
    /// suffix if even that is taken.
    pub fn bind(&mut self, name: &str, file: &str) -> String {
        if self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        let base = format!("{}_{}", file_identifier(file), name);
        let mut candidate = base.clone();
        let mut n = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{base}{n}");
            n += 1;
        }
        candidate
    }

    #[cfg(test)]
    fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

/// Message types one generated file imports, grouped by defining file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DependencyGroup {
    groups: Vec<ImportGroup>,
    /// Fully-qualified name to local binding.
    bindings: BTreeMap<String, String>,
}

/// The types imported from one defining file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportGroup {
    pub file: String,
    pub types: Vec<ImportedType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedType {
    /// Name exported by the defining module.
    pub name: String,
    /// Local identifier in the generated file.
    pub binding: String,
}

impl ImportedType {
    pub fn is_aliased(&self) -> bool {
        self.name != self.binding
    }
}

impl DependencyGroup {
    /// Collect the types referenced by all `services` of one input file,
    /// binding each one in `table`.
    pub fn collect_for_file(services: &[ServiceDefinition], table: &mut BindingTable) -> Self {
        let mut group = Self::default();
        for service in services {
            for ty in collect(service) {
                group.insert(ty, table);
            }
        }
        group
    }

    fn insert(&mut self, ty: &TypeReference, table: &mut BindingTable) {
        let index = match self.groups.iter().position(|g| g.file == ty.file) {
            Some(index) => index,
            None => {
                self.groups.push(ImportGroup {
                    file: ty.file.clone(),
                    types: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        let group = &mut self.groups[index];

        if let Some(existing) = group.types.iter().find(|t| t.name == ty.name) {
            self.bindings
                .entry(ty.full_name.clone())
                .or_insert_with(|| existing.binding.clone());
            return;
        }

        let binding = table.bind(&ty.name, &ty.file);
        if binding != ty.name {
            tracing::debug!(
                ty = %ty.full_name,
                alias = %binding,
                "aliasing import to avoid a name collision"
            );
        }
        group.types.push(ImportedType {
            name: ty.name.clone(),
            binding: binding.clone(),
        });
        self.bindings.insert(ty.full_name.clone(), binding);
    }

    pub fn groups(&self) -> &[ImportGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Local identifier for `ty` in the generated file.
    pub fn binding<'a>(&'a self, ty: &'a TypeReference) -> &'a str {
        self.bindings
            .get(&ty.full_name)
            .map(String::as_str)
            .unwrap_or(&ty.name)
    }
}

/// Turn a file path into an identifier fragment: extension dropped, every
/// non-alphanumeric character replaced by `_`.
fn file_identifier(file: &str) -> String {
    let stem = crate::naming::strip_extension(file);
    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) || ident.is_empty() {
        ident.insert(0, '_');
    }
    ident
}
