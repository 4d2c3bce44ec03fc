//! Automatic variable expansion tests.

use makefile_rs::{
    ALL_PREREQUISITES, Assignment, CommandLine, Config, ExpandErrorKind, Expression, Identifier,
    Node, Program, Target, format, parse_str,
};
use pretty_assertions::assert_eq;

mod common;

#[test]
fn expand_concatenates_without_separator() {
    let mut program = parse_str("target:prereqA prereqB\n\tcommand $<\n").unwrap();
    program.expand().unwrap();
    let target = program.targets().next().unwrap();
    let Expression::Variable(var) = &target.recipe[0].terms[1] else {
        panic!("expected a variable");
    };
    assert_eq!(var.value, "prereqAprereqB");
}

#[test]
fn expand_with_space_separator() {
    let mut program = parse_str("a: x y z\n\tcat $<\n").unwrap();
    program.expand_with(&Config::new().separator(" ")).unwrap();
    assert_eq!(format(&program), "a: x y z\n\tcat x y z\n");
}

#[test]
fn expand_every_occurrence() {
    let output = common::expand_and_format("a: b c\n\t$< $<\n\techo $<\n");
    assert_eq!(output, "a: b c\n\tbc bc\n\techo bc\n");
}

#[test]
fn expand_each_rule_uses_its_own_prerequisites() {
    let output = common::expand_and_format("a: one\n\tx $<\nb: two three\n\ty $<\n");
    assert_eq!(output, "a: one\n\tx one\nb: two three\n\ty twothree\n");
}

#[test]
fn expand_skips_variable_prerequisites() {
    let output = common::expand_and_format("a: $(SRC) b\n\tx $<\n");
    assert_eq!(output, "a:  b\n\tx b\n");
}

#[test]
fn expand_leaves_named_variables_unresolved() {
    let output = common::expand_and_format("a: b\n\t$(CC) $<\n");
    assert_eq!(output, "a: b\n\t b\n");
}

#[test]
fn expand_marks_targets() {
    let mut program = parse_str("a: b\nc: d\n").unwrap();
    assert!(program.targets().all(|t| !t.expanded));
    program.expand().unwrap();
    assert!(program.targets().all(|t| t.expanded));
}

#[test]
fn expand_records_symbol() {
    let mut program = parse_str("a: b\n\tx $<\nc: d e\n").unwrap();
    assert!(program.symbols.is_empty());
    program.expand().unwrap();
    assert_eq!(program.symbols.get(ALL_PREREQUISITES), Some("de"));
}

#[test]
fn expand_twice_is_identical() {
    let mut program = parse_str("a: b c\n\tx $<\n").unwrap();
    program.expand().unwrap();
    let once = format(&program);
    program.expand().unwrap();
    assert_eq!(format(&program), once);
}

#[test]
fn expand_empty_program() {
    let mut program = Program::new();
    program.expand().unwrap();
    assert!(program.symbols.is_empty());
}

#[test]
fn expand_skips_assignment_nodes() {
    let mut program = Program::new()
        .assignment(Assignment {
            name: Identifier::new("CC").into(),
            value: Vec::new(),
        })
        .target(
            Target::new("a")
                .prerequisite("b")
                .command(CommandLine::new().all_prerequisites()),
        );
    program.expand().unwrap();
    assert!(matches!(program.tree[0], Node::Assignment(_)));
    assert_eq!(format(&program), "a: b\n\tb\n");
}

#[test]
fn expand_rejects_nested_command() {
    let mut target = Target::new("bad");
    target.recipe.push(CommandLine {
        terms: vec![CommandLine::new().word("inner").into()],
    });
    let err = Program::new().target(target).expand().unwrap_err();
    assert_eq!(err.kind, ExpandErrorKind::UnexpectedTerm);
    assert_eq!(
        err.to_string(),
        "recipe term must be an identifier or variable in target 'bad'"
    );
}
