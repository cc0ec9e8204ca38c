//! Usage line and help text rendering.

use std::fmt::Write as _;

use crate::schema::Schema;
use crate::types::FieldSpec;

impl Schema {
    /// Renders the one-line usage summary.
    ///
    /// Optionals come first in schema order, then positionals.
    ///
    /// # Examples
    ///
    /// ```
    /// use argschema_core::{FieldAnnotations, FieldVisitor, Introspectable, Schema, Slot};
    ///
    /// #[derive(Default)]
    /// struct Args { pos: String, name: String }
    ///
    /// impl Introspectable for Args {
    ///     fn visit_fields(&mut self, v: &mut dyn FieldVisitor) {
    ///         v.field("POS", FieldAnnotations::new(), Slot::String(&mut self.pos));
    ///         v.field("Name", FieldAnnotations::new(), Slot::String(&mut self.name));
    ///     }
    /// }
    ///
    /// let schema = Schema::for_type::<Args>().unwrap();
    /// assert_eq!(schema.usage_line("prog"), "usage: prog [--help] [--name NAME] <POS>");
    /// ```
    pub fn usage_line(&self, prog: &str) -> String {
        let mut line = format!("usage: {prog}");
        for spec in self.optionals().iter().chain(self.positionals()) {
            line.push(' ');
            line.push_str(&spec.to_string());
        }
        line
    }

    /// Renders the full help text: usage line, description, one section per
    /// argument group, and epilog.
    pub fn help_text(&self, prog: &str, description: Option<&str>, epilog: Option<&str>) -> String {
        let width = self
            .fields()
            .map(|spec| spec.to_string().len())
            .max()
            .unwrap_or(0);

        let mut out = self.usage_line(prog);
        out.push('\n');
        if let Some(description) = description {
            let _ = write!(out, "\n{description}\n");
        }
        if !self.positionals().is_empty() {
            out.push_str("\nPositional arguments:\n");
            for spec in self.positionals() {
                write_entry(&mut out, spec, width);
            }
        }
        out.push_str("\nOptional arguments:\n");
        for spec in self.optionals() {
            write_entry(&mut out, spec, width);
        }
        if let Some(epilog) = epilog {
            let _ = write!(out, "\n{epilog}\n");
        }
        out
    }
}

fn write_entry(out: &mut String, spec: &FieldSpec, width: usize) {
    let mut notes: Vec<String> = Vec::new();
    if let Some(help) = &spec.help {
        notes.push(help.clone());
    }
    if let Some(default) = &spec.default {
        notes.push(format!("(default: {default})"));
    }
    if let Some(choices) = &spec.choices {
        notes.push(format!("(choices: {})", choices.join("|")));
    }
    let rendered = spec.to_string();
    if notes.is_empty() {
        let _ = writeln!(out, "  {rendered}");
    } else {
        let _ = writeln!(out, "  {rendered:<width$}  {}", notes.join(" "));
    }
}
