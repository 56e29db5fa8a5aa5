//! Indentation-aware text sink with `$variable$` substitution.
//!
//! Templates reference variables as `$name$`; `$$` emits a literal `$`.
//! Indentation is two spaces per level and is inserted at the start of every
//! non-empty line, including lines produced by substituted values.

use std::collections::BTreeMap;

/// Substitution variables for [`Printer::print`].
pub type Vars = BTreeMap<&'static str, String>;

const INDENT: &str = "  ";

#[derive(Debug)]
pub struct Printer {
    buf: String,
    level: usize,
    at_line_start: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            level: 0,
            at_line_start: true,
        }
    }

    /// Print `template` with `$name$` references replaced from `vars`.
    ///
    /// An unknown variable is a bug in the calling emitter; it is reported and
    /// the reference is left in the output verbatim.
    pub fn print(&mut self, vars: &Vars, template: &str) {
        let mut rest = template;
        while let Some(start) = rest.find('$') {
            self.write(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('$') else {
                tracing::warn!(template, "unterminated variable reference in template");
                self.write(&rest[start..]);
                return;
            };
            let name = &after[..end];
            if name.is_empty() {
                self.write("$");
            } else if let Some(value) = vars.get(name) {
                self.write(value);
            } else {
                tracing::warn!(variable = name, "unknown template variable");
                self.write(&rest[start..start + end + 2]);
            }
            rest = &after[end + 1..];
        }
        self.write(rest);
    }

    /// Print text without variable substitution.
    pub fn print_raw(&mut self, text: &str) {
        self.write(text);
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn outdent(&mut self) {
        debug_assert!(self.level > 0, "outdent without matching indent");
        self.level = self.level.saturating_sub(1);
    }

    /// Print a `/** ... */` block for `docs`, if any.
    pub fn print_doc_comment(&mut self, docs: Option<&str>) {
        let Some(docs) = docs else {
            return;
        };
        let lines: Vec<&str> = docs.trim_end().lines().map(str::trim_end).collect();
        let first = lines.iter().position(|l| !l.trim().is_empty());
        let Some(first) = first else {
            return;
        };

        self.write("/**\n");
        for line in &lines[first..] {
            let line = line.strip_prefix(' ').unwrap_or(line);
            if line.is_empty() {
                self.write(" *\n");
            } else {
                self.write(" * ");
                self.write(&line.replace("*/", "*\\/"));
                self.write("\n");
            }
        }
        self.write(" */\n");
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn write(&mut self, text: &str) {
        for ch in text.chars() {
            if self.at_line_start && ch != '\n' {
                for _ in 0..self.level {
                    self.buf.push_str(INDENT);
                }
            }
            self.at_line_start = ch == '\n';
            self.buf.push(ch);
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Build [`Vars`] from `(name, value)` pairs.
pub fn vars<const N: usize>(pairs: [(&'static str, &str); N]) -> Vars {
    pairs
        .into_iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_variables() {
        let mut p = Printer::new();
        p.print(
            &vars([("name", "Greeter"), ("kind", "class")]),
            "export $kind$ $name$ {}\n",
        );
        assert_eq!(p.finish(), "export class Greeter {}\n");
    }

    #[test]
    fn double_dollar_is_literal() {
        let mut p = Printer::new();
        p.print(&Vars::new(), "cost: $$5\n");
        assert_eq!(p.finish(), "cost: $5\n");
    }

    #[test]
    fn indents_non_empty_lines_only() {
        let mut p = Printer::new();
        p.print_raw("class A {\n");
        p.indent();
        p.print_raw("a();\n\nb();\n");
        p.outdent();
        p.print_raw("}\n");
        assert_eq!(p.finish(), "class A {\n  a();\n\n  b();\n}\n");
    }

    #[test]
    fn indentation_applies_inside_substituted_values() {
        let mut p = Printer::new();
        p.indent();
        p.print(&vars([("body", "x();\ny();\n")]), "$body$");
        assert_eq!(p.finish(), "  x();\n  y();\n");
    }

    #[test]
    fn indentation_continues_mid_line() {
        let mut p = Printer::new();
        p.indent();
        p.print_raw("let a = ");
        p.print_raw("1;\n");
        assert_eq!(p.finish(), "  let a = 1;\n");
    }

    #[test]
    fn doc_comment_block() {
        let mut p = Printer::new();
        p.indent();
        p.print_doc_comment(Some(" Sends a greeting.\n\n Second paragraph.\n"));
        assert_eq!(
            p.finish(),
            "  /**\n   * Sends a greeting.\n   *\n   * Second paragraph.\n   */\n"
        );
    }

    #[test]
    fn blank_doc_comment_prints_nothing() {
        let mut p = Printer::new();
        p.print_doc_comment(Some("  \n"));
        p.print_doc_comment(None);
        assert_eq!(p.finish(), "");
    }
}
