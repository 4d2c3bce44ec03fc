use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Reserved name of the automatic "all prerequisites" variable.
pub const ALL_PREREQUISITES: &str = "$^";

/// Complete rule file: top-level nodes in source order plus the
/// symbol table filled in by expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub tree: Vec<Node>,
    pub symbols: SymbolTable,
}

/// Top-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Target(Target),
    /// Reserved for variable definitions; the parser never produces it.
    Assignment(Assignment),
}

/// Rule: `head: prerequisites` followed by tab-indented recipe lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub head: Expression,
    pub prerequisites: Vec<Expression>,
    pub recipe: Vec<CommandLine>,
    /// Set once expansion has visited this rule.
    pub expanded: bool,
}

/// Variable definition `name = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: Expression,
    pub value: Vec<Expression>,
}

/// A term, a variable reference, or a whole recipe line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Variable(VariableReference),
    Command(CommandLine),
}

/// Bare literal term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

/// `$(name)` or `$<`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    pub name: String,
    /// Empty until expansion resolves it.
    pub value: String,
}

/// One recipe line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub terms: Vec<Expression>,
}

/// Variable name to last-known value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: HashMap<String, String>,
}

impl Node {
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Target(_) => "target",
            Self::Assignment(_) => "assignment",
        }
    }
}

impl Expression {
    /// Text this expression stands for.
    ///
    /// Identifiers yield their name, variables their resolved value, and
    /// command lines their terms joined by single spaces.
    #[must_use]
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Self::Identifier(id) => Cow::Borrowed(&id.name),
            Self::Variable(var) => Cow::Borrowed(&var.value),
            Self::Command(cmd) => Cow::Owned(cmd.value()),
        }
    }

    /// Identifier or variable name; `None` for command lines.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identifier(id) => Some(&id.name),
            Self::Variable(var) => Some(&var.name),
            Self::Command(_) => None,
        }
    }

    #[must_use]
    pub const fn is_term(&self) -> bool {
        matches!(self, Self::Identifier(_) | Self::Variable(_))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl From<Identifier> for Expression {
    fn from(id: Identifier) -> Self {
        Self::Identifier(id)
    }
}

impl From<VariableReference> for Expression {
    fn from(var: VariableReference) -> Self {
        Self::Variable(var)
    }
}

impl From<CommandLine> for Expression {
    fn from(cmd: CommandLine) -> Self {
        Self::Command(cmd)
    }
}

impl Identifier {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl VariableReference {
    /// Reference to a user variable, `$(name)`. Unresolved.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
        }
    }

    /// The automatic variable written `$<`. Until expanded it reads as
    /// its own reserved name.
    #[must_use]
    pub fn all_prerequisites() -> Self {
        Self {
            name: ALL_PREREQUISITES.to_string(),
            value: ALL_PREREQUISITES.to_string(),
        }
    }

    #[must_use]
    pub fn is_all_prerequisites(&self) -> bool {
        self.name == ALL_PREREQUISITES
    }
}

impl CommandLine {
    /// Terms joined by single spaces.
    #[must_use]
    pub fn value(&self) -> String {
        self.terms
            .iter()
            .map(Expression::value)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl SymbolTable {
    /// Record `value` for `name`, replacing any previous value.
    pub fn define(&mut self, name: &str, value: String) {
        self.entries.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Program {
    /// Iterate over the rules in source order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.tree.iter().filter_map(|node| match node {
            Node::Target(target) => Some(target),
            Node::Assignment(_) => None,
        })
    }
}
