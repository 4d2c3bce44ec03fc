//! Post-parse pass that resolves automatic variables in recipes.

use std::fmt;

use tracing::{trace, warn};

use crate::ast::{ALL_PREREQUISITES, Expression, Node, Program, Target};
use crate::config::Config;

/// Classifies an expansion error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpandErrorKind {
    /// A command line listed as a prerequisite.
    UnexpectedPrerequisite,
    /// A command line nested inside a recipe line.
    UnexpectedTerm,
}

impl fmt::Display for ExpandErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedPrerequisite => {
                write!(f, "prerequisite must be an identifier or variable")
            }
            Self::UnexpectedTerm => {
                write!(f, "recipe term must be an identifier or variable")
            }
        }
    }
}

/// Error produced during expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in target '{target}'")]
pub struct ExpandError {
    pub kind: ExpandErrorKind,
    pub target: String,
}

impl Program {
    /// Resolve `$<` in every recipe using the rule's prerequisites.
    ///
    /// Safe to call repeatedly; each call recomputes the same values.
    ///
    /// # Errors
    ///
    /// Returns `ExpandError` if a rule holds a command line where a
    /// term belongs.
    pub fn expand(&mut self) -> Result<(), ExpandError> {
        self.expand_with(&Config::default())
    }

    /// Like [`Program::expand`], joining prerequisites with
    /// `config.separator`.
    ///
    /// # Errors
    ///
    /// Returns `ExpandError` if a rule holds a command line where a
    /// term belongs.
    pub fn expand_with(&mut self, config: &Config) -> Result<(), ExpandError> {
        for node in &mut self.tree {
            match node {
                Node::Target(target) => {
                    let value = expand_target(target, &config.separator)?;
                    self.symbols.define(ALL_PREREQUISITES, value);
                }
                Node::Assignment(_) => {
                    warn!(kind = node.kind_name(), "skipping node during expansion");
                }
            }
        }
        Ok(())
    }
}

/// Returns the value assigned to the all-prerequisites variable.
fn expand_target(target: &mut Target, separator: &str) -> Result<String, ExpandError> {
    let mut prerequisites = Vec::with_capacity(target.prerequisites.len());
    for prerequisite in &target.prerequisites {
        match prerequisite {
            Expression::Identifier(id) => prerequisites.push(id.name.as_str()),
            // variables are not expanded recursively
            Expression::Variable(_) => {}
            Expression::Command(_) => {
                return Err(ExpandError {
                    kind: ExpandErrorKind::UnexpectedPrerequisite,
                    target: head_name(&target.head),
                });
            }
        }
    }
    let value = prerequisites.join(separator);

    for line in &mut target.recipe {
        for term in &mut line.terms {
            match term {
                Expression::Variable(var) if var.is_all_prerequisites() => {
                    var.value.clone_from(&value);
                }
                Expression::Identifier(_) | Expression::Variable(_) => {}
                Expression::Command(_) => {
                    return Err(ExpandError {
                        kind: ExpandErrorKind::UnexpectedTerm,
                        target: head_name(&target.head),
                    });
                }
            }
        }
    }

    target.expanded = true;
    trace!(rule = %target.head, value = %value, "expanded target");
    Ok(value)
}

fn head_name(head: &Expression) -> String {
    head.name().unwrap_or_default().to_string()
}
