//! Ninja syntax writer
//!
//! Renders graph statements as a `build.ninja` file:
//! - `# ` comments, word-wrapped
//! - `name = value` bindings, two spaces per indent level
//! - `build outs: rule ins | implicit` edges followed by their variables
//! - lines longer than the width broken at unescaped spaces with ` $`

use std::io::{self, Write};

use crate::domain::entities::{BuildEdge, RuleDecl};
use crate::domain::ports::GraphWriter;

/// Default maximum line width before wrapping
pub const DEFAULT_LINE_WIDTH: usize = 1000;

const INDENT: &str = "  ";

/// Escape a path for use in a build line
///
/// `$` is left alone so variable references like `$raw_output_root` survive;
/// literal dollars must already be written as `$$`.
pub fn escape_path(word: &str) -> String {
    word.replace(' ', "$ ").replace(':', "$:")
}

/// Ninja file writer over any `io::Write`
pub struct NinjaWriter<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> NinjaWriter<W> {
    /// Create a writer with the default line width
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Builder: set the line width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Flush and return the underlying stream
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn indented_variable(&mut self, name: &str, value: &str, indent: usize) -> io::Result<()> {
        self.line(&format!("{name} = {value}"), indent)
    }

    fn line(&mut self, text: &str, indent: usize) -> io::Result<()> {
        let mut leading = INDENT.repeat(indent);
        let mut text = text;

        while leading.len() + text.len() > self.width {
            // Room left once the trailing " $" is accounted for
            let available = self.width.saturating_sub(leading.len() + 2);
            let Some(space) = find_break(text, available) else {
                break;
            };
            writeln!(self.out, "{leading}{} $", &text[..space])?;
            text = &text[space + 1..];
            leading = INDENT.repeat(indent + 2);
        }

        writeln!(self.out, "{leading}{text}")
    }
}

impl<W: Write> GraphWriter for NinjaWriter<W> {
    fn comment(&mut self, text: &str) -> io::Result<()> {
        if text.trim().is_empty() {
            return writeln!(self.out, "#");
        }
        for line in wrap_words(text, self.width.saturating_sub(2)) {
            writeln!(self.out, "# {line}")?;
        }
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    fn variable(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.indented_variable(name, value, 0)
    }

    fn rule(&mut self, rule: &RuleDecl) -> io::Result<()> {
        self.line(&format!("rule {}", rule.name), 0)?;
        self.indented_variable("command", &rule.command, 1)?;
        if !rule.description.is_empty() {
            self.indented_variable("description", &rule.description, 1)?;
        }
        Ok(())
    }

    fn build(&mut self, edge: &BuildEdge) -> io::Result<()> {
        let outputs: Vec<String> = edge.outputs.iter().map(|o| escape_path(o)).collect();

        let mut parts = vec![edge.rule.clone()];
        parts.extend(edge.inputs.iter().map(|i| escape_path(i)));
        if !edge.implicit.is_empty() {
            parts.push("|".to_string());
            parts.extend(edge.implicit.iter().map(|i| escape_path(i)));
        }

        self.line(
            &format!("build {}: {}", outputs.join(" "), parts.join(" ")),
            0,
        )?;

        for (name, value) in &edge.variables {
            self.indented_variable(name, value, 1)?;
        }
        Ok(())
    }
}

/// Pick the space to break `text` at, or `None` if the line cannot be broken
///
/// Prefers the right-most unescaped space within `available` bytes, then the
/// first unescaped space after it.
fn find_break(text: &str, available: usize) -> Option<usize> {
    let mut end = available.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    while let Some(space) = text[..end].rfind(' ') {
        if dollars_before(text, space) % 2 == 0 {
            return Some(space);
        }
        end = space;
    }

    let mut from = available.min(text.len());
    while !text.is_char_boundary(from) {
        from += 1;
    }
    while let Some(offset) = text[from..].find(' ') {
        let space = from + offset;
        if dollars_before(text, space) % 2 == 0 {
            return Some(space);
        }
        from = space + 1;
    }
    None
}

/// Count of consecutive `$` immediately before `index`
fn dollars_before(text: &str, index: usize) -> usize {
    text.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'$')
        .count()
}

/// Greedy word wrap that never splits a word
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
