//! End-to-end behaviour: text in, expanded rule text out.

use makefile_rs::{
    Error, ParseErrorKind, Program, TokenKind, Tokenizer, format, parse_str, tokenize,
};
use pretty_assertions::assert_eq;

mod common;

// -----------------------------------------------------------
// Round trips through parse and format.
// -----------------------------------------------------------

#[test]
fn roundtrip_single_rule() {
    common::roundtrip("app: main.o util.o\n\tlink app\n");
}

#[test]
fn roundtrip_several_rules() {
    common::roundtrip("all: app docs\napp: main.o\n\tlink\n\tstrip app\ndocs:\n");
}

#[test]
fn roundtrip_normalises_spacing() {
    let program = parse_str("app :main.o   util.o\n\tlink   app\n").unwrap();
    assert_eq!(format(&program), "app: main.o util.o\n\tlink app\n");
}

// -----------------------------------------------------------
// Full pipeline.
// -----------------------------------------------------------

#[test]
fn pipeline_simple_rule() {
    let output = common::expand_and_format("target:prereqA prereqB\n\tcommand $<\n");
    assert_eq!(output, "target: prereqA prereqB\n\tcommand prereqAprereqB\n");
}

#[test]
fn pipeline_without_trailing_newline() {
    let output = common::expand_and_format("target:prereqA prereqB\n\tcommand $<");
    assert_eq!(output, "target: prereqA prereqB\n\tcommand prereqAprereqB\n");
}

#[test]
fn pipeline_ignores_comments_and_assignments() {
    let input = "\
# rules for the site
OUT = site
site: index.html style.css
\tpublish $<

clean:
\tremove site
";
    let output = common::expand_and_format(input);
    assert_eq!(
        output,
        "site: index.html style.css\n\tpublish index.htmlstyle.css\nclean:\n\tremove site\n"
    );
}

#[test]
fn pipeline_expand_is_idempotent() {
    let input = "a: b c\n\tx $<\nd: e\n\t$<\n";
    let mut once = parse_str(input).unwrap();
    once.expand().unwrap();
    let mut twice = parse_str(input).unwrap();
    twice.expand().unwrap();
    twice.expand().unwrap();
    assert_eq!(format(&once), format(&twice));
}

#[test]
fn pipeline_only_newlines() {
    let mut program = parse_str("\n\n\n\n").unwrap();
    assert!(program.tree.is_empty());
    program.expand().unwrap();
    assert_eq!(format(&program), "");
}

#[test]
fn pipeline_empty_input() {
    assert_eq!(common::expand_and_format(""), "");
}

#[test]
fn pipeline_crlf_input() {
    let output = common::expand_and_format("a: b\r\n\tc $<\r\n");
    assert_eq!(output, "a: b\n\tc b\n");
}

// -----------------------------------------------------------
// Failures.
// -----------------------------------------------------------

#[test]
fn fatal_on_number_head() {
    let err = parse_str("123:dep\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ref e) if matches!(e.kind, ParseErrorKind::InvalidTargetHead { .. })
    ));
}

#[test]
fn fatal_error_yields_no_program() {
    let result: Result<Program, Error> = parse_str("good: a\nbad: 1\n");
    assert!(result.is_err());
}

// -----------------------------------------------------------
// Tokenizer properties.
// -----------------------------------------------------------

#[test]
fn rows_after_each_newline() {
    let tokens = tokenize("a\nb c\nd\n\ne").expect("tokenize");
    let mut seen = 0;
    for pair in tokens.windows(2) {
        if pair[0].kind == TokenKind::Newline {
            seen += 1;
            assert_eq!(pair[1].span.row, seen);
            assert_eq!(pair[1].span.column, 0);
        }
    }
    assert_eq!(seen, 4);
}

#[test]
fn streaming_and_collected_tokens_agree() {
    let input = "a: b.c\n\tx $(Y) $<\n";
    let collected = tokenize(input).expect("tokenize");
    let mut tokenizer = Tokenizer::new(input);
    for expected in &collected {
        assert_eq!(&tokenizer.next_token().expect("token"), expected);
    }
    assert_eq!(
        tokenizer.next_token().expect("token").kind,
        TokenKind::EndOfInput
    );
}
