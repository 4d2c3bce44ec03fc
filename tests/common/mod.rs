#![allow(dead_code)]

use makefile_rs::{Program, format, parse, parse_str, tokenize};
use pretty_assertions::assert_eq;

/// Parse, expand, and format `input`.
pub fn expand_and_format(input: &str) -> String {
    let mut program = parse_str(input).expect("parse failed");
    program.expand().expect("expand failed");
    format(&program)
}

/// Parse then format must give back `input` unchanged.
pub fn roundtrip(input: &str) {
    let tokens = tokenize(input).expect("tokenize failed");
    let program = parse(&tokens).expect("parse failed");
    let output = format(&program);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

/// Helper: format a program, parse it back, assert structural equality.
pub fn assert_ast_roundtrip(original: &Program) {
    let formatted = format(original);
    let parsed = parse_str(&formatted).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse formatted output: {e}\n\
             --- formatted ---\n{formatted}"
        )
    });

    assert_eq!(
        original.tree, parsed.tree,
        "tree mismatch\n--- formatted ---\n{formatted}"
    );
}

/// Head names of every rule, in order.
pub fn heads(program: &Program) -> Vec<String> {
    program
        .targets()
        .map(|t| t.head.value().into_owned())
        .collect()
}
