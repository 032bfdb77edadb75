//! Build graph statements
//!
//! The units a `GraphWriter` accepts. The compiler produces them, the Ninja
//! writer renders them, the recording writer keeps them for inspection.

use std::collections::BTreeMap;

/// A rule declaration: a named command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecl {
    pub name: String,
    pub command: String,
    pub description: String,
}

impl RuleDecl {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            description: description.into(),
        }
    }
}

/// A build edge: outputs produced by running `rule` over `inputs`
///
/// `implicit` inputs are dependencies that do not appear in `$in`.
/// `variables` are scoped to this edge and kept sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
    pub rule: String,
    pub outputs: Vec<String>,
    pub inputs: Vec<String>,
    pub implicit: Vec<String>,
    pub variables: BTreeMap<String, String>,
}

impl BuildEdge {
    /// Create an edge with a single output and no inputs yet
    pub fn new(rule: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            outputs: vec![output.into()],
            inputs: Vec::new(),
            implicit: Vec::new(),
            variables: BTreeMap::new(),
        }
    }

    /// Builder: add a primary input
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Builder: add many primary inputs
    pub fn inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// Builder: add an implicit dependency
    pub fn implicit(mut self, dep: impl Into<String>) -> Self {
        self.implicit.push(dep.into());
        self
    }

    /// Builder: set an edge-scoped variable
    pub fn variable(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.variables.insert(name.into(), value.to_string());
        self
    }

    /// The single output of a one-output edge (the first output otherwise)
    pub fn output(&self) -> &str {
        self.outputs.first().map(String::as_str).unwrap_or_default()
    }
}

/// One unit appended to a build graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphStatement {
    Comment(String),
    Newline,
    Variable { name: String, value: String },
    Rule(RuleDecl),
    Build(BuildEdge),
}
