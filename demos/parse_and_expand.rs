//! Parse a rule file, expand `$<`, and print it back.

fn main() {
    let input = "\
app: main.o util.o
\tlink $<
clean:
\tremove app
";

    let mut program = makefile_rs::parse_str(input).expect("parse failed");

    println!("Targets: {}", program.targets().count());
    for target in program.targets() {
        println!(
            "  {} <- {} prerequisite(s)",
            target.head,
            target.prerequisites.len()
        );
    }

    program.expand().expect("expand failed");

    let output = makefile_rs::format(&program);
    println!("\nExpanded output:\n{output}");
}
