//! File and module assembly.
//!
//! One generated module per service-bearing input file, plus the optional
//! aggregate files: a `@NgModule` per output directory (`index`) and one named
//! `@NgModule` for the whole run (`module-name`).

use crate::deps::{BindingTable, DependencyGroup};
use crate::error::{ConfigError, GenerateError};
use crate::ir::{FileDefinition, ServiceDefinition};
use crate::naming::{file_name, generated_file_name, generated_module, join, parent_dir, strip_extension};
use crate::options::OptionSet;
use crate::output::{EmitContext, emit_service};
use crate::printer::{Printer, vars};
use crate::registry;
use crate::traits::Transport;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const BANNER: &str = "// GENERATED CODE -- DO NOT EDIT!\n";

/// Identifiers every generated per-file module binds or reads as globals.
const RESERVED: [&str; 10] = [
    "Injectable",
    "NgZone",
    "Observable",
    "Subject",
    "grpc",
    "Error",
    "Promise",
    "console",
    "window",
    "location",
];

/// Class name of the per-directory aggregate module.
pub const INDEX_MODULE_CLASS: &str = "GeneratedGrpcAngularModule";

/// One output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Output path relative to the output root, forward slashes.
    pub name: String,
    pub content: String,
}

/// A generation run bound to one resolved option set.
pub struct Generator {
    options: OptionSet,
    transport: &'static dyn Transport,
}

impl Generator {
    pub fn new(options: OptionSet) -> Result<Self, ConfigError> {
        let transport = registry::get_backend(options.backend)
            .ok_or(ConfigError::BackendUnavailable(options.backend))?;
        Ok(Self { options, transport })
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// Generate the per-file module for `file`, or `None` if it has no services.
    pub fn generate_file(&self, file: &FileDefinition) -> Option<GeneratedFile> {
        if !file.has_services() {
            tracing::debug!(file = %file.name, "no services, skipping");
            return None;
        }

        let mut table = BindingTable::with_reserved(
            RESERVED
                .iter()
                .map(|name| name.to_string())
                .chain(file.services.iter().map(|s| s.name.clone())),
        );
        let dependencies = DependencyGroup::collect_for_file(&file.services, &mut table);

        let mut printer = Printer::new();
        printer.print_raw(BANNER);
        printer.print(&vars([("file", file.name.as_str())]), "// source: $file$\n\n");
        self.emit_common_imports(&mut printer);
        self.emit_message_imports(&mut printer, &dependencies);
        self.emit_service_imports(&mut printer, file);

        for service in &file.services {
            let ctx = EmitContext {
                options: &self.options,
                transport: self.transport,
                service,
                dependencies: &dependencies,
            };
            emit_service(&mut printer, &ctx);
        }

        let name = generated_file_name(&file.name);
        tracing::debug!(file = %file.name, output = %name, services = file.services.len(), "generated file");
        Some(GeneratedFile {
            name,
            content: printer.finish(),
        })
    }

    /// Generate every output of the run: per-file modules in input order, then
    /// per-directory indexes sorted by directory, then the named module.
    pub fn generate_all(&self, files: &[FileDefinition]) -> Result<Vec<GeneratedFile>, GenerateError> {
        let mut outputs: Vec<GeneratedFile> =
            files.iter().filter_map(|file| self.generate_file(file)).collect();

        let service_files: Vec<&FileDefinition> = files.iter().filter(|f| f.has_services()).collect();

        if self.options.index {
            outputs.extend(index_files(&service_files));
        }
        if let Some(module_name) = &self.options.module_name {
            outputs.push(module_file(module_name, &service_files));
        }

        let mut seen = BTreeSet::new();
        for output in &outputs {
            if !seen.insert(output.name.as_str()) {
                return Err(GenerateError::DuplicateOutput(output.name.clone()));
            }
        }
        Ok(outputs)
    }

    fn emit_common_imports(&self, printer: &mut Printer) {
        let descriptor = &self.options.descriptor;
        printer.print(
            &vars([
                ("binding", descriptor.import_binding),
                ("module", descriptor.import_module),
            ]),
            "import { Injectable, NgZone } from '@angular/core';\n\
             import { Observable, Subject } from 'rxjs';\n\
             import $binding$ from '$module$';\n",
        );
    }

    fn emit_message_imports(&self, printer: &mut Printer, dependencies: &DependencyGroup) {
        for group in dependencies.groups() {
            let specifiers: Vec<String> = group
                .types
                .iter()
                .map(|ty| {
                    if ty.is_aliased() {
                        format!("{} as {}", ty.name, ty.binding)
                    } else {
                        ty.name.clone()
                    }
                })
                .collect();
            let path = format!(
                "{}/{}_pb",
                self.options.message_import_prefix,
                strip_extension(&group.file)
            );
            emit_import_block(printer, &specifiers, &path);
        }
    }

    fn emit_service_imports(&self, printer: &mut Printer, file: &FileDefinition) {
        let specifiers: Vec<String> = file
            .services
            .iter()
            .map(|s| self.transport.service_import(&s.name))
            .collect();
        let path = format!(
            "{}/{}{}",
            self.options.service_import_prefix,
            strip_extension(&file.name),
            self.options.descriptor.service_file_suffix
        );
        emit_import_block(printer, &specifiers, &path);
    }
}

/// Resolve `parameter` and generate every output for `files`.
pub fn generate(parameter: &str, files: &[FileDefinition]) -> Result<Vec<GeneratedFile>, GenerateError> {
    let options = OptionSet::resolve(parameter)?;
    Generator::new(options)?.generate_all(files)
}

fn emit_import_block(printer: &mut Printer, specifiers: &[String], path: &str) {
    printer.print_raw("import {\n");
    printer.indent();
    for specifier in specifiers {
        printer.print(&vars([("specifier", specifier.as_str())]), "$specifier$,\n");
    }
    printer.outdent();
    printer.print(&vars([("path", path)]), "} from '$path$';\n");
}

/// Services imported by one aggregate file, grouped by generated module.
struct Aggregate<'a> {
    imports: Vec<(String, Vec<(&'a ServiceDefinition, String)>)>,
}

impl<'a> Aggregate<'a> {
    /// `module_for` maps an input file to the specifier it is imported from.
    fn new(files: &[&'a FileDefinition], class_name: &str, module_for: impl Fn(&str) -> String) -> Self {
        let mut table = BindingTable::with_reserved(["NgModule".to_string(), class_name.to_string()]);
        let imports = files
            .iter()
            .map(|&file| {
                let services = file
                    .services
                    .iter()
                    .map(|service| (service, table.bind(&service.name, &file.name)))
                    .collect();
                (module_for(&file.name), services)
            })
            .collect();
        Self { imports }
    }

    fn render(&self, class_name: &str, default_export: bool) -> String {
        let mut printer = Printer::new();
        printer.print_raw(BANNER);
        printer.print_raw("\nimport { NgModule } from '@angular/core';\n");
        for (module, services) in &self.imports {
            let specifiers: Vec<String> = services
                .iter()
                .map(|(service, binding)| {
                    if *binding == service.name {
                        binding.clone()
                    } else {
                        format!("{} as {}", service.name, binding)
                    }
                })
                .collect();
            emit_import_block(&mut printer, &specifiers, module);
        }

        printer.print_raw("\n@NgModule({\n");
        printer.indent();
        printer.print_raw("providers: [\n");
        printer.indent();
        for (_, services) in &self.imports {
            for (_, binding) in services {
                printer.print(&vars([("binding", binding.as_str())]), "$binding$,\n");
            }
        }
        printer.outdent();
        printer.print_raw("],\n");
        printer.outdent();
        let class = vars([("class", class_name)]);
        printer.print(&class, "})\nexport class $class$ {}\n");
        if default_export {
            printer.print(&class, "\nexport default $class$;\n");
        }
        printer.finish()
    }
}

fn index_files(files: &[&FileDefinition]) -> Vec<GeneratedFile> {
    let mut by_dir: BTreeMap<&str, Vec<&FileDefinition>> = BTreeMap::new();
    for &file in files {
        by_dir.entry(parent_dir(&file.name)).or_default().push(file);
    }

    by_dir
        .into_iter()
        .map(|(dir, files)| {
            let aggregate = Aggregate::new(&files, INDEX_MODULE_CLASS, |name| {
                format!("./{}", generated_module(file_name(name)))
            });
            let name = join(dir, "index.ts");
            tracing::debug!(output = %name, files = files.len(), "generated index");
            GeneratedFile {
                name,
                content: aggregate.render(INDEX_MODULE_CLASS, true),
            }
        })
        .collect()
}

fn module_file(module_name: &str, files: &[&FileDefinition]) -> GeneratedFile {
    let aggregate = Aggregate::new(files, module_name, |name| format!("./{}", generated_module(name)));
    GeneratedFile {
        name: format!("{module_name}_ng_grpc.module.ts"),
        content: aggregate.render(module_name, false),
    }
}
