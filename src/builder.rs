use crate::ast::{
    Assignment, CommandLine, Expression, Identifier, Node, Program, Target, VariableReference,
};

impl Program {
    /// Create a new empty program.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule.
    #[must_use]
    pub fn target(mut self, target: Target) -> Self {
        self.tree.push(Node::Target(target));
        self
    }

    /// Add a variable definition node.
    #[must_use]
    pub fn assignment(mut self, assignment: Assignment) -> Self {
        self.tree.push(Node::Assignment(assignment));
        self
    }
}

impl Target {
    /// Create a rule named by a plain identifier.
    #[must_use]
    pub fn new(head: &str) -> Self {
        Self::with_head(Identifier::new(head).into())
    }

    /// Create a rule with an arbitrary head expression.
    #[must_use]
    pub const fn with_head(head: Expression) -> Self {
        Self {
            head,
            prerequisites: Vec::new(),
            recipe: Vec::new(),
            expanded: false,
        }
    }

    /// Add an identifier prerequisite.
    #[must_use]
    pub fn prerequisite(mut self, name: &str) -> Self {
        self.prerequisites.push(Identifier::new(name).into());
        self
    }

    /// Add a `$(name)` prerequisite.
    #[must_use]
    pub fn variable_prerequisite(mut self, name: &str) -> Self {
        self.prerequisites
            .push(VariableReference::named(name).into());
        self
    }

    /// Add a recipe line.
    #[must_use]
    pub fn command(mut self, line: CommandLine) -> Self {
        self.recipe.push(line);
        self
    }
}

impl CommandLine {
    /// Create an empty recipe line.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a literal word.
    #[must_use]
    pub fn word(mut self, word: &str) -> Self {
        self.terms.push(Identifier::new(word).into());
        self
    }

    /// Append several literal words.
    #[must_use]
    pub fn words(mut self, words: &[&str]) -> Self {
        self.terms
            .extend(words.iter().map(|w| Expression::from(Identifier::new(w))));
        self
    }

    /// Append `$(name)`.
    #[must_use]
    pub fn variable(mut self, name: &str) -> Self {
        self.terms.push(VariableReference::named(name).into());
        self
    }

    /// Append `$<`, the all-prerequisites variable.
    #[must_use]
    pub fn all_prerequisites(mut self) -> Self {
        self.terms.push(VariableReference::all_prerequisites().into());
        self
    }
}
