//! Printer that serializes a program back into rule-file text.
//!
//! Each rule becomes a header line `head: prereq ...` followed by one
//! tab-indented line per recipe command.

use std::fmt::{self, Write};
use std::io;

use tracing::warn;

use crate::ast::{Node, Program, Target};

/// Format a `Program` into rule-file text.
///
/// Variables print their current value, so run
/// [`Program::expand`] first to see resolved recipes.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render(&mut out, program);
    out
}

/// Write the formatted program to an I/O sink.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_to<W: io::Write>(program: &Program, mut out: W) -> io::Result<()> {
    out.write_all(format(program).as_bytes())?;
    out.flush()
}

/// Render into any `fmt::Write` sink.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn render<W: Write>(out: &mut W, program: &Program) -> fmt::Result {
    for node in &program.tree {
        match node {
            Node::Target(target) => render_target(out, target)?,
            Node::Assignment(_) => {
                warn!(kind = node.kind_name(), "skipping node while printing");
            }
        }
    }
    Ok(())
}

fn render_target<W: Write>(out: &mut W, target: &Target) -> fmt::Result {
    write!(out, "{}:", target.head)?;
    for prerequisite in &target.prerequisites {
        write!(out, " {prerequisite}")?;
    }
    out.write_char('\n')?;

    for line in &target.recipe {
        writeln!(out, "\t{line}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Assignment, CommandLine, Identifier, VariableReference};

    fn rule(head: &str, prerequisites: &[&str], recipe: Vec<CommandLine>) -> Node {
        Node::Target(Target {
            head: Identifier::new(head).into(),
            prerequisites: prerequisites
                .iter()
                .map(|p| Identifier::new(p).into())
                .collect(),
            recipe,
            expanded: false,
        })
    }

    fn command(words: &[&str]) -> CommandLine {
        CommandLine {
            terms: words.iter().map(|w| Identifier::new(w).into()).collect(),
        }
    }

    #[test]
    fn simple_rule() {
        let program = Program {
            tree: vec![rule("app", &["main.o", "util.o"], vec![command(&["link", "app"])])],
            ..Program::default()
        };
        assert_eq!(format(&program), "app: main.o util.o\n\tlink app\n");
    }

    #[test]
    fn rule_without_prerequisites_or_recipe() {
        let program = Program {
            tree: vec![rule("clean", &[], Vec::new())],
            ..Program::default()
        };
        assert_eq!(format(&program), "clean:\n");
    }

    #[test]
    fn empty_program() {
        assert_eq!(format(&Program::default()), "");
    }

    #[test]
    fn unexpanded_automatic_variable() {
        let program = Program {
            tree: vec![rule(
                "a",
                &["b"],
                vec![CommandLine {
                    terms: vec![
                        Identifier::new("echo").into(),
                        VariableReference::all_prerequisites().into(),
                    ],
                }],
            )],
            ..Program::default()
        };
        assert_eq!(format(&program), "a: b\n\techo $^\n");
    }

    #[test]
    fn assignment_is_skipped() {
        let program = Program {
            tree: vec![
                Node::Assignment(Assignment {
                    name: Identifier::new("CC").into(),
                    value: Vec::new(),
                }),
                rule("a", &[], Vec::new()),
            ],
            ..Program::default()
        };
        assert_eq!(format(&program), "a:\n");
    }

    #[test]
    fn display_matches_format() {
        let program = Program {
            tree: vec![rule("a", &["b"], vec![command(&["c"])])],
            ..Program::default()
        };
        assert_eq!(program.to_string(), format(&program));
    }

    #[test]
    fn write_to_sink() {
        let program = Program {
            tree: vec![rule("a", &["b"], Vec::new())],
            ..Program::default()
        };
        let mut buf = Vec::new();
        write_to(&program, &mut buf).expect("write failed");
        assert_eq!(buf, b"a: b\n");
    }
}
