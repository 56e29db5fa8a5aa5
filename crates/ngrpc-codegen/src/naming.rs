//! Path and identifier helpers for generated file names.

/// Drop the extension of the last path component.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Directory part of a forward-slash path, empty for root-level files.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Last component of a forward-slash path.
pub fn file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |i| &path[i + 1..])
}

/// Join a directory and a file name; an empty directory yields the name.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Lowercase the first character (`SayHello` -> `sayHello`).
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generated per-file module for an input schema file.
pub fn generated_file_name(proto_file: &str) -> String {
    format!("{}{}", strip_extension(proto_file), GENERATED_SUFFIX)
}

/// Module specifier (no extension) of the generated per-file module.
pub fn generated_module(proto_file: &str) -> String {
    format!("{}{}", strip_extension(proto_file), GENERATED_MODULE_SUFFIX)
}

pub const GENERATED_MODULE_SUFFIX: &str = "_ng_grpc_pb";
const GENERATED_SUFFIX: &str = "_ng_grpc_pb.ts";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_extension_only_touches_last_component() {
        assert_eq!(strip_extension("foo/bar.proto"), "foo/bar");
        assert_eq!(strip_extension("foo.v1/bar"), "foo.v1/bar");
        assert_eq!(strip_extension("a.b.proto"), "a.b");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn parent_and_file_name() {
        assert_eq!(parent_dir("a/b/c.proto"), "a/b");
        assert_eq!(parent_dir("c.proto"), "");
        assert_eq!(file_name("a/b/c.proto"), "c.proto");
        assert_eq!(file_name("c.proto"), "c.proto");
    }

    #[test]
    fn join_paths() {
        assert_eq!(join("", "index.ts"), "index.ts");
        assert_eq!(join("a/b", "index.ts"), "a/b/index.ts");
    }

    #[test]
    fn lower_first_char() {
        assert_eq!(lower_first("SayHello"), "sayHello");
        assert_eq!(lower_first("URLFetch"), "uRLFetch");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn generated_names() {
        assert_eq!(generated_file_name("a/hello.proto"), "a/hello_ng_grpc_pb.ts");
        assert_eq!(generated_module("a/hello.proto"), "a/hello_ng_grpc_pb");
    }
}
