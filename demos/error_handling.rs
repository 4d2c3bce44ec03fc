//! Demonstrate error handling for invalid rule files.

fn report(input: &str) {
    match makefile_rs::parse_str(input) {
        Ok(_) => println!("Parsed OK (unexpected)"),
        Err(makefile_rs::Error::Lex(e)) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: row {}, column {}", e.span.row, e.span.column);
        }
        Err(makefile_rs::Error::Parse(e)) => {
            println!("Parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Expected: {:?}", e.expected());
        }
        Err(makefile_rs::Error::Expand(e)) => {
            println!("Expand error: {e}");
        }
    }
}

fn main() {
    // Unrecognized character
    report("app: main_o\n");

    println!();

    // Number used as a target name
    report("123: dep\n");

    println!();

    // Unclosed variable reference
    report("app: $(SRC\n");
}
