//! Recording graph writer
//!
//! Keeps every appended statement in memory so a compiled graph can be
//! inspected without touching the file system, or replayed into another
//! writer later.

use std::io;

use crate::domain::entities::{BuildEdge, GraphStatement, RuleDecl};
use crate::domain::ports::GraphWriter;

/// Graph writer that records statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingGraphWriter {
    statements: Vec<GraphStatement>,
}

impl RecordingGraphWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All statements in append order
    pub fn statements(&self) -> &[GraphStatement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<GraphStatement> {
        self.statements
    }

    /// Build edges in append order
    pub fn edges(&self) -> impl Iterator<Item = &BuildEdge> {
        self.statements.iter().filter_map(|s| match s {
            GraphStatement::Build(edge) => Some(edge),
            _ => None,
        })
    }

    /// Build edges using `rule`
    pub fn edges_for_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a BuildEdge> {
        self.edges().filter(move |edge| edge.rule == rule)
    }

    /// The edge producing `output`, if any
    pub fn edge_for_output(&self, output: &str) -> Option<&BuildEdge> {
        self.edges()
            .find(|edge| edge.outputs.iter().any(|o| o == output))
    }

    /// Rule declarations in append order
    pub fn rules(&self) -> impl Iterator<Item = &RuleDecl> {
        self.statements.iter().filter_map(|s| match s {
            GraphStatement::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    /// Value of a top-level variable
    pub fn variable_value(&self, name: &str) -> Option<&str> {
        self.statements.iter().find_map(|s| match s {
            GraphStatement::Variable { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Append every recorded statement to `writer`
    pub fn replay(&self, writer: &mut dyn GraphWriter) -> io::Result<()> {
        for statement in &self.statements {
            writer.statement(statement)?;
        }
        Ok(())
    }
}

impl GraphWriter for RecordingGraphWriter {
    fn comment(&mut self, text: &str) -> io::Result<()> {
        self.statements.push(GraphStatement::Comment(text.to_string()));
        Ok(())
    }

    fn newline(&mut self) -> io::Result<()> {
        self.statements.push(GraphStatement::Newline);
        Ok(())
    }

    fn variable(&mut self, name: &str, value: &str) -> io::Result<()> {
        self.statements.push(GraphStatement::Variable {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn rule(&mut self, rule: &RuleDecl) -> io::Result<()> {
        self.statements.push(GraphStatement::Rule(rule.clone()));
        Ok(())
    }

    fn build(&mut self, edge: &BuildEdge) -> io::Result<()> {
        self.statements.push(GraphStatement::Build(edge.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ninja::NinjaWriter;

    #[test]
    fn records_statements_in_order() {
        let mut writer = RecordingGraphWriter::new();
        writer.comment("hello").unwrap();
        writer.newline().unwrap();
        writer.variable("tool_root", "util").unwrap();

        assert_eq!(
            writer.statements(),
            &[
                GraphStatement::Comment("hello".to_string()),
                GraphStatement::Newline,
                GraphStatement::Variable {
                    name: "tool_root".to_string(),
                    value: "util".to_string()
                },
            ]
        );
        assert_eq!(writer.variable_value("tool_root"), Some("util"));
    }

    #[test]
    fn edge_queries() {
        let mut writer = RecordingGraphWriter::new();
        writer.build(&BuildEdge::new("copy", "a").input("x")).unwrap();
        writer.build(&BuildEdge::new("phony", "all").input("a")).unwrap();

        assert_eq!(writer.edges().count(), 2);
        assert_eq!(writer.edges_for_rule("copy").count(), 1);
        assert_eq!(writer.edge_for_output("all").map(|e| e.rule.as_str()), Some("phony"));
        assert!(writer.edge_for_output("missing").is_none());
    }

    #[test]
    fn replay_renders_same_text_as_direct_writing() {
        let rule = RuleDecl::new("copy", "cp $in $out", "Copy $out");
        let edge = BuildEdge::new("copy", "out").input("in");

        let mut recording = RecordingGraphWriter::new();
        recording.comment("").unwrap();
        recording.rule(&rule).unwrap();
        recording.build(&edge).unwrap();

        let mut replayed = NinjaWriter::new(Vec::new());
        recording.replay(&mut replayed).unwrap();

        let mut direct = NinjaWriter::new(Vec::new());
        direct.comment("").unwrap();
        direct.rule(&rule).unwrap();
        direct.build(&edge).unwrap();

        assert_eq!(
            replayed.into_inner().unwrap(),
            direct.into_inner().unwrap()
        );
    }
}
