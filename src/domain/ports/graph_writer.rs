//! GraphWriter port - the build-graph emitter the compiler drives
//!
//! The compiler never owns graph-file syntax. It appends units through this
//! trait; implementations render them (Ninja) or record them (tests, replay).

use std::io;

use crate::domain::entities::{BuildEdge, GraphStatement, RuleDecl};

/// Append-only build graph sink
///
/// Every call appends exactly one unit. Calls fail only when the underlying
/// stream is unavailable.
///
/// Implementations:
/// - `NinjaWriter` - renders Ninja syntax to any `io::Write`
/// - `RecordingGraphWriter` - keeps statements in memory
pub trait GraphWriter {
    /// Comment line(s); an empty comment is a bare `#`
    fn comment(&mut self, text: &str) -> io::Result<()>;

    /// Blank line
    fn newline(&mut self) -> io::Result<()>;

    /// Top-level variable binding
    fn variable(&mut self, name: &str, value: &str) -> io::Result<()>;

    /// Rule declaration
    fn rule(&mut self, rule: &RuleDecl) -> io::Result<()>;

    /// Build edge
    fn build(&mut self, edge: &BuildEdge) -> io::Result<()>;

    /// Append a statement by dispatching to the matching call
    fn statement(&mut self, statement: &GraphStatement) -> io::Result<()> {
        match statement {
            GraphStatement::Comment(text) => self.comment(text),
            GraphStatement::Newline => self.newline(),
            GraphStatement::Variable { name, value } => self.variable(name, value),
            GraphStatement::Rule(rule) => self.rule(rule),
            GraphStatement::Build(edge) => self.build(edge),
        }
    }
}
